pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::config::OrderBy;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Read Guardian headlines in the terminal", long_about = None)]
pub struct Cli {
    /// API key for the content API (overrides the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base url of the content API (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Fetch headlines once and print them
    Headlines {
        #[command(flatten)]
        choice: SectionChoice,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the saved section and sort order
    Settings {
        #[command(flatten)]
        choice: SectionChoice,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SectionChoice {
    /// Section id, e.g. politics, world, technology
    #[arg(short, long)]
    pub section: Option<String>,

    /// Sort order
    #[arg(short, long, value_enum)]
    pub order_by: Option<OrderBy>,
}

impl SectionChoice {
    pub fn is_empty(&self) -> bool {
        self.section.is_none() && self.order_by.is_none()
    }
}
