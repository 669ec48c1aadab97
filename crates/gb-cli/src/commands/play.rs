use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use gb_engine::{
    Channel, EngineConfig, EngineError, EngineResult, Game, InvestigatorState, JsonFileStore,
    RenderSink, SkillAllocator,
};

use super::ContentDir;

const DEFAULT_SLOT: &str = "quick";

/// Prints pages as they arrive and keeps the stat panel for `status`.
#[derive(Default)]
struct TerminalSink {
    stats: BTreeMap<String, String>,
    date: String,
}

impl RenderSink for TerminalSink {
    fn show_heading(&mut self, text: &str) {
        println!("\n  {}", text.bold());
    }

    fn show_instructions(&mut self, text: &str) {
        println!("  {}", text.italic());
    }

    fn show_description(&mut self, text: &str) {
        println!("\n{text}\n");
    }

    fn set_choices(&mut self, labels: &[String]) {
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {label}", (i + 1).to_string().cyan());
        }
    }

    fn show_stat(&mut self, name: &str, value: &str) {
        self.stats.insert(name.to_string(), value.to_string());
    }

    fn show_date(&mut self, text: &str) {
        self.date = text.to_string();
    }

    fn notify(&mut self, channel: Channel, message: &str, _duration: Duration) {
        match channel {
            Channel::SkillCheck => println!("  {}", message.magenta()),
            Channel::Stat => println!("  {}", message.green()),
        }
    }
}

/// Reads `Skill=points` pairs from the player.
struct PromptAllocator<'a> {
    input: &'a mut dyn BufRead,
    eof: bool,
}

impl SkillAllocator for PromptAllocator<'_> {
    fn allocate(
        &mut self,
        investigator: &str,
        points: u32,
        skills: &BTreeMap<String, i32>,
    ) -> Option<BTreeMap<String, i32>> {
        println!("  {investigator} has {points} skill points to allocate.");
        for (skill, value) in skills {
            println!("    {skill} ({value})");
        }
        print!("  Allocate as Skill=points, separated by commas: ");
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.eof = true;
                return None;
            }
            Ok(_) => {}
        }

        let mut allocation = BTreeMap::new();
        for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let parsed = part
                .split_once('=')
                .and_then(|(skill, n)| Some((skill.trim(), n.trim().parse::<i32>().ok()?)));
            match parsed {
                Some((skill, n)) => {
                    *allocation.entry(skill.to_string()).or_insert(0) += n;
                }
                None => {
                    println!("  {}", format!("could not read '{part}'").yellow());
                    return None;
                }
            }
        }
        Some(allocation)
    }
}

pub fn run(dir: &Path, seed: Option<u64>, saves: &Path) -> Result<(), String> {
    let mut config = EngineConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut store = JsonFileStore::new(saves);

    println!("  {} Gamebook", "Starting".bold());
    println!("  Type a choice number, or 'help' for commands.");

    let mut game = Game::start(&ContentDir::new(dir), config, TerminalSink::default())
        .map_err(|e| e.to_string())?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if game.allocation_pending().is_some() {
            let mut allocator = PromptAllocator {
                input: &mut reader,
                eof: false,
            };
            match game.allocate_with(&mut allocator) {
                Ok(true) => println!("  {}", "Skills updated.".green()),
                Ok(false) if allocator.eof => break,
                Ok(false) => {}
                Err(e) => println!("  {}", e.to_string().yellow()),
            }
            continue;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };
        let slot = if arg.is_empty() { DEFAULT_SLOT } else { arg };

        let outcome = match command.to_ascii_lowercase().as_str() {
            "quit" | "q" => break,
            "help" | "h" => {
                print_help();
                Ok(())
            }
            "status" => {
                print_status(&game);
                Ok(())
            }
            "save" => game.save(&mut store, slot).map(|()| {
                println!("  Saved to slot '{slot}'.");
            }),
            "load" => match game.load(&store, slot) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    println!("  {}", format!("No save in slot '{slot}'.").yellow());
                    Ok(())
                }
                Err(e) => Err(e),
            },
            "die" => death(&mut game),
            "restart" => game.restart(),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => game.select(n - 1).and_then(|_| check_vitals(&mut game)),
                _ => {
                    println!("  {}", format!("Unknown command '{input}'. Type 'help'.").yellow());
                    Ok(())
                }
            },
        };

        match outcome {
            // Already shown in place of the page.
            Ok(()) | Err(EngineError::EntryNotFound(_) | EngineError::LocationTableNotFound(_)) => {}
            Err(e) => println!("  {}", e.to_string().yellow()),
        }
    }

    Ok(())
}

/// Nothing in the story kills an investigator by itself; the player is out
/// once health or sanity runs out.
fn check_vitals(game: &mut Game<TerminalSink>) -> EngineResult<()> {
    let Some(session) = game.session() else {
        return Ok(());
    };
    if !session.is_incapacitated() {
        return Ok(());
    }
    println!("  {}", format!("{} can go no further.", session.character).red());
    death(game)
}

fn death(game: &mut Game<TerminalSink>) -> EngineResult<()> {
    if game.death()? == InvestigatorState::GameOver {
        println!(
            "  {}",
            "All investigators are dead. Type 'restart' to begin again or 'quit' to leave.".red()
        );
    }
    Ok(())
}

fn print_status(game: &Game<TerminalSink>) {
    let sink = game.sink();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    for (name, value) in &sink.stats {
        table.add_row(vec![name.as_str(), value.as_str()]);
    }
    table.add_row(vec!["Date", sink.date.as_str()]);
    if let Some(session) = game.session() {
        table.add_row(vec!["Entry", session.current_entry.as_str()]);
        for (skill, value) in &session.skills {
            table.add_row(vec![skill.clone(), value.to_string()]);
        }
    }
    println!("{table}");
}

fn print_help() {
    println!("  <number>        take a choice");
    println!("  status          show the investigator");
    println!("  save [slot]     save (default slot: {DEFAULT_SLOT})");
    println!("  load [slot]     load a save");
    println!("  die             the investigator dies; the next one takes over");
    println!("  restart         start again with the first investigator");
    println!("  quit            leave");
}
