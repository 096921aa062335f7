mod commands;
mod prompt;
mod remote;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dayplan_core::config::AppConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Manage your day schedule and sync it to a remote event store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event (prompts for anything not given as a flag)
    Add {
        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// Theme label (e.g. "Math")
        #[arg(short, long)]
        theme: Option<String>,

        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,

        /// Display color tag (e.g. "#4CAF50")
        #[arg(short, long)]
        color: Option<String>,

        /// Add even when the event overlaps an existing one
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Delete an event from a day
    Delete {
        /// Event date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Event position in the day listing (skips the selection prompt)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Edit an event in place
    Edit {
        /// Event date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Event position in the day listing (skips the selection prompt)
        #[arg(short, long)]
        index: Option<usize>,

        /// Save even when the edited event overlaps another one
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show one day's events, or the whole schedule
    Show {
        /// Date to show (YYYY-MM-DD, defaults to today)
        date: Option<String>,

        /// Show every day
        #[arg(long)]
        all: bool,
    },
    /// View a date range, optionally restricted to one theme
    Agenda {
        /// First day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Last day, inclusive (YYYY-MM-DD, defaults to a week after from)
        #[arg(long)]
        to: Option<String>,

        /// Only events with exactly this theme
        #[arg(long)]
        theme: Option<String>,
    },
    /// Search themes and descriptions for a substring
    Search {
        term: String,

        /// Match inflected word forms as well
        #[arg(long)]
        fuzzy: bool,
    },
    /// Export the schedule as a tabular document
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// First day to export (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to export, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only events with exactly this theme
        #[arg(long)]
        theme: Option<String>,
    },
    /// Show what a push would change on the remote store
    Status,
    /// Reconcile the remote store with the local schedule
    Push,
    /// Replace the local schedule with the remote store's events
    Pull {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Add {
            date,
            start,
            end,
            theme,
            description,
            color,
            yes,
        } => commands::add::run(&config, date, start, end, theme, description, color, yes),
        Commands::Delete { date, index } => commands::delete::run(&config, date, index),
        Commands::Edit { date, index, yes } => commands::edit::run(&config, date, index, yes),
        Commands::Show { date, all } => commands::show::run(&config, date, all),
        Commands::Agenda { from, to, theme } => {
            commands::agenda::run(&config, from, to, theme.as_deref())
        }
        Commands::Search { term, fuzzy } => commands::search::run(&config, &term, fuzzy),
        Commands::Export {
            output,
            format,
            from,
            to,
            theme,
        } => commands::export::run(&config, &output, format, from, to, theme.as_deref()),
        Commands::Status => commands::sync::status(&config).await,
        Commands::Push => commands::sync::push(&config).await,
        Commands::Pull { yes } => commands::sync::pull(&config, yes).await,
    }
}
