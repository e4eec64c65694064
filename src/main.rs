/// Command line entry point for the habit ledger
///
/// This file sets up logging, parses command line arguments, and drives
/// the tracker library against a SQLite-backed store.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use habit_ledger::{HabitId, HabitTracker, SqliteStore};

/// Get the default database path with fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::data_dir().map(|mut p| {
            p.push("habit-ledger");
            p
        }),
        dirs::home_dir().map(|mut p| {
            p.push(".habit-ledger");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit-ledger");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let mut db_path = potential_path.clone();
            db_path.push("habits.db");
            return Ok(db_path);
        }
    }

    Err("could not find a writable location for the habit database".into())
}

/// Command line arguments for the habit ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's data directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new habit
    Add {
        /// Display name of the habit
        name: String,
        /// Longer description
        #[arg(default_value = "")]
        description: String,
        /// Days between occurrences (1 = daily, 7 = weekly)
        #[arg(long, default_value_t = 1)]
        every: u32,
    },
    /// List every habit with its id and streak
    List,
    /// Show habits still outstanding today
    Today,
    /// Log a completion for a habit
    Done {
        /// Habit id as printed by `list`
        id: String,
    },
    /// Remove the most recent completion of a habit
    Undo {
        /// Habit id as printed by `list`
        id: String,
    },
    /// Show today's completed/total counts
    Status,
    /// Delete a habit
    Remove {
        /// Habit id as printed by `list`
        id: String,
    },
}

fn parse_habit_id(id: &str) -> Result<HabitId, Box<dyn std::error::Error>> {
    HabitId::from_key(id).ok_or_else(|| format!("'{}' is not a valid habit id", id).into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_ledger={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let tracker = HabitTracker::new(SqliteStore::new(db_path)?);

    match args.command {
        Command::Add {
            name,
            description,
            every,
        } => {
            let id = tracker.create_habit(&name, &description, every)?;
            println!("Created '{}' ({})", name, id);
        }
        Command::List => {
            let habits = tracker.list_habits()?;
            if habits.is_empty() {
                println!("No habits yet. Create one with `habit-ledger add <name>`.");
            }
            for (id, habit) in habits {
                println!(
                    "{}  {} (every {} day{}, streak {})",
                    id,
                    habit.name,
                    habit.frequency_days,
                    if habit.frequency_days == 1 { "" } else { "s" },
                    habit.streak
                );
            }
        }
        Command::Today => {
            let due = tracker.habits_due_today()?;
            if due.is_empty() {
                println!("Nothing left to do today.");
            }
            for (id, habit) in due {
                println!("{}  {}", id, habit.name);
            }
        }
        Command::Done { id } => {
            let id = parse_habit_id(&id)?;
            tracker.log_completion(&id)?;
            let habit = tracker.habit(&id)?;
            println!("Logged '{}' (streak {})", habit.name, habit.streak);
        }
        Command::Undo { id } => {
            let id = parse_habit_id(&id)?;
            tracker.remove_last_completion(&id)?;
            let habit = tracker.habit(&id)?;
            println!("Removed last completion of '{}' (streak {})", habit.name, habit.streak);
        }
        Command::Status => {
            let (completed, total) = tracker.completion_ratio()?;
            println!("{} of {} habits completed today", completed, total);
        }
        Command::Remove { id } => {
            let id = parse_habit_id(&id)?;
            tracker.delete_habit(&id)?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}
