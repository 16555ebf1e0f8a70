use clap::{Parser, Subcommand};
use daylist_core::{NewTask, UiEvent};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daylist", about = "Daily task list with a local store", version)]
pub struct Cli {
    /// Path to the SQLite store file; without it only the health check runs
    #[arg(long, env = "DAYLIST_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Absolute directory for rotating log files
    #[arg(long, env = "DAYLIST_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// JSON file overriding storage keys, categories and log level
    #[arg(long, env = "DAYLIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the banner, the task list and the counters
    Show,

    /// Add a task at the top of the list
    Add {
        /// Category label, e.g. Work
        category: String,
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Due date, preferably YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Initial note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Flip a task between pending and completed
    Toggle {
        /// Task id
        id: String,
    },

    /// Edit a task's note interactively
    Note {
        /// Task id
        id: String,
    },

    /// Delete a task after confirmation
    Delete {
        /// Task id
        id: String,
    },

    /// Remove every task after confirmation
    Clear,

    /// Hide today's quote until tomorrow
    #[command(name = "dismiss-quote")]
    DismissQuote,

    /// Show only tasks whose text, category or note contains QUERY
    Find {
        /// Search words; empty shows everything
        query: Vec<String>,
    },

    /// Show only one category ("All" for everything)
    Filter {
        /// Category label
        category: String,
    },

    /// Move SOURCE so it lands just before DEST
    Move {
        /// Id of the task to move
        source: String,
        /// Id of the task to drop onto
        dest: String,
    },

    /// List the filter sidebar entries
    Categories,
}

impl Command {
    /// Controller event for this command; `None` for read-only commands.
    pub fn into_event(self) -> Option<UiEvent> {
        let event = match self {
            Self::Show | Self::Categories => return None,
            Self::Add {
                category,
                text,
                due,
                note,
            } => {
                let mut request = NewTask::new(text.join(" "), category);
                if let Some(due) = due {
                    request = request.with_due_date(due);
                }
                if let Some(note) = note {
                    request = request.with_note(note);
                }
                UiEvent::Add(request)
            }
            Self::Toggle { id } => UiEvent::ToggleComplete(id),
            Self::Note { id } => UiEvent::EditNote(id),
            Self::Delete { id } => UiEvent::Delete(id),
            Self::Clear => UiEvent::ClearAll,
            Self::DismissQuote => UiEvent::DismissQuote,
            Self::Find { query } => UiEvent::SearchInput(query.join(" ")),
            Self::Filter { category } => UiEvent::SelectFilter(category),
            Self::Move { source, dest } => UiEvent::Drop {
                dest_id: dest,
                payload_source: Some(source),
            },
        };
        Some(event)
    }
}
