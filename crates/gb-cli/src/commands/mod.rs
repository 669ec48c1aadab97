pub mod check;
pub mod play;
pub mod roll;

use std::path::{Path, PathBuf};

use gb_core::{Collection, ContentError, ContentResult, ContentSource, ContentStore};

/// Content stored as three JSON files in one directory.
pub struct ContentDir {
    dir: PathBuf,
}

impl ContentDir {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    async fn read(&self, collection: Collection) -> ContentResult<String> {
        let path = self.dir.join(collection.file_name());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ContentError::LoadFailure {
                collection,
                message: format!("{}: {e}", path.display()),
            })
    }
}

impl ContentSource for ContentDir {
    fn load(&self) -> ContentResult<ContentStore> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ContentError::LoadFailure {
                collection: Collection::Entries,
                message: e.to_string(),
            })?;
        let (investigators, entries, locations) = runtime.block_on(async {
            tokio::try_join!(
                self.read(Collection::Investigators),
                self.read(Collection::Entries),
                self.read(Collection::Locations),
            )
        })?;
        log::debug!("read content from {}", self.dir.display());
        ContentStore::from_json_parts(&investigators, &entries, &locations)
    }
}
