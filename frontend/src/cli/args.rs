//! CLI argument definitions for `me-bau`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "me-bau", version, about = "Pregnancy diary client")]
pub struct Cli {
    /// Path to config.yaml (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ME_BAU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the pregnancy dashboard
    Home,
    /// Show or edit the account profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Complete the pregnancy details of a new account
    FillInfo {
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due_date: String,
        #[arg(long)]
        baby_name: String,
        /// Nam or Nữ
        #[arg(long)]
        gender: String,
        #[arg(long)]
        week: String,
    },
    /// Check a registration form
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ME_BAU_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        accept_terms: bool,
    },
    /// List article categories, or the articles of one category
    Articles {
        /// Category slug (e.g. dinh-duong)
        category: Option<String>,
    },
    /// Manage diary entries
    Diary {
        #[command(subcommand)]
        action: DiaryAction,
    },
    /// Show or write the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,
    /// Change profile fields; omitted fields keep their current value
    Update {
        #[arg(long)]
        name: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        week: Option<String>,
        #[arg(long)]
        baby_name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DiaryAction {
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Delete {
        id: String,
    },
}
