//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "matchquiz")]
#[command(about = "Compatibility questionnaire: answer questions, find your best matches")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the configuration file (default: config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database schema
    Init,
    /// Add a question to the questionnaire
    AddQuestion {
        /// Category the question belongs to
        category: String,
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove a question by id
    RemoveQuestion {
        /// Question id as shown by `questions`
        id: i32,
    },
    /// List questions, optionally filtered by category
    Questions {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show all question categories
    Categories,
    /// Take the questionnaire
    Start {
        /// User id
        #[arg(short, long)]
        user: i64,
        /// Display name stored with the profile
        #[arg(short, long)]
        name: String,
    },
    /// Delete your profile so you can take the questionnaire again
    Retake {
        #[arg(short, long)]
        user: i64,
    },
    /// View a profile
    Profile {
        #[arg(short, long)]
        user: i64,
    },
    /// Find and show your best matches
    Matches {
        #[arg(short, long)]
        user: i64,
    },
    /// Compare your profile with another user
    Compare {
        #[arg(short, long)]
        user: i64,
        /// User to compare with
        #[arg(short, long)]
        other: i64,
    },
    /// Show the most recent profiles
    Leaderboard {
        /// Number of profiles to show (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show current configuration
    Config,
}
