//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use spacehub_content::TypeTab;
use spacehub_core::SpaceHubConfig;

/// SpaceHub - space session calendar and course content browser
#[derive(Parser, Debug)]
#[command(name = "spacehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding events.json and content.json
    #[arg(short, long, env = "SPACEHUB_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Event seed file (default: <data-dir>/events.json)
    #[arg(long, global = true)]
    pub events: Option<PathBuf>,

    /// Content seed file (default: <data-dir>/content.json)
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse calendar events
    Events {
        #[command(subcommand)]
        action: EventsCommand,
    },

    /// Browse course content
    Content {
        #[command(subcommand)]
        action: ContentCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// List events in start order
    List {
        /// Only show these statuses (repeatable)
        #[arg(short, long)]
        status: Vec<String>,
    },

    /// Step the cursor forward through the (filtered) events
    Next {
        /// Number of steps
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,

        /// Only step through these statuses (repeatable)
        #[arg(short, long)]
        status: Vec<String>,
    },

    /// Step the cursor backward through the (filtered) events
    Prev {
        /// Number of steps
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,

        /// Only step through these statuses (repeatable)
        #[arg(short, long)]
        status: Vec<String>,
    },

    /// Show the calendar columns around a date (YYYY-MM-DD)
    Day {
        date: NaiveDate,

        /// Show a single day instead of the configured mode
        #[arg(long)]
        single: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// List documents at a path (/, /module/N, /module/N/chapter/N)
    Ls {
        /// Breadcrumb href
        #[arg(default_value = "/")]
        path: String,

        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        query: String,

        /// Type tab (all, course, exercise)
        #[arg(short, long, default_value = "all")]
        tab: TypeTab,
    },

    /// Print the module/chapter/document tree
    Tree,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, config: SpaceHubConfig) -> SpaceHubConfig {
        match &self.data_dir {
            Some(dir) => config.with_data_dir(dir.clone()),
            None => config,
        }
    }

    /// Event seed path, falling back to the data directory.
    pub fn events_path(&self, config: &SpaceHubConfig) -> PathBuf {
        self.events.clone().unwrap_or_else(|| config.events_file())
    }

    /// Content seed path, falling back to the data directory.
    pub fn content_path(&self, config: &SpaceHubConfig) -> PathBuf {
        self.content.clone().unwrap_or_else(|| config.content_file())
    }
}
