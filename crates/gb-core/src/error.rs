/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// The three content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Investigator templates keyed by name.
    Investigators,
    /// Story entries keyed by id.
    Entries,
    /// Location tables keyed by location type.
    Locations,
}

impl Collection {
    /// All collections, in load order.
    pub const ALL: [Collection; 3] = [Self::Investigators, Self::Entries, Self::Locations];

    /// Conventional file name for this collection in a content directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Investigators => "investigators.json",
            Self::Entries => "entries.json",
            Self::Locations => "locations.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Investigators => write!(f, "investigators"),
            Self::Entries => write!(f, "entries"),
            Self::Locations => write!(f, "locations"),
        }
    }
}

/// Errors that can occur when loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A collection could not be fetched.
    #[error("failed to load {collection}: {message}")]
    LoadFailure {
        /// Which collection failed.
        collection: Collection,
        /// What went wrong.
        message: String,
    },

    /// A collection was fetched but is not valid content.
    #[error("failed to parse {collection}: {source}")]
    Parse {
        /// Which collection failed.
        collection: Collection,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A roster investigator has no template.
    #[error("investigator template not found: \"{0}\"")]
    MissingInvestigator(String),
}
