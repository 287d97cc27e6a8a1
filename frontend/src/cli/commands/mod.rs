//! CLI command handlers for `me-bau`.
//!
//! Every handler gets a [`Context`] holding the API client and the
//! file-backed session, drives one screen's state model and prints the
//! result.

pub mod account;
pub mod articles;
pub mod config;
pub mod diary;
pub mod home;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use me_bau::services::{ApiClient, FileTokenStore, SessionContext};
use me_bau::{AppConfig, UserAlert};

use crate::cli::args::Command;

/// What every command needs: the effective config and where it came from,
/// the API client and the file-backed session
pub struct Context {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub api: ApiClient,
    pub session: SessionContext,
}

impl Context {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        let api = ApiClient::from_config(&config.api)?;
        let store = FileTokenStore::new(config.token_file());
        Ok(Self {
            config,
            config_path,
            api,
            session: SessionContext::new(Arc::new(store)),
        })
    }
}

/// Dispatch a parsed command
pub async fn run(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Login { email, password } => account::login(ctx, email, password).await,
        Command::Logout => account::logout(ctx).await,
        Command::Home => home::show(ctx).await,
        Command::Profile { action } => account::profile(ctx, action).await,
        Command::FillInfo {
            due_date,
            baby_name,
            gender,
            week,
        } => account::fill_info(ctx, due_date, baby_name, gender, week).await,
        Command::Register {
            username,
            email,
            password,
            confirm_password,
            accept_terms,
        } => account::register(username, email, password, confirm_password, accept_terms),
        Command::Articles { category } => articles::run(ctx, category).await,
        Command::Diary { action } => diary::run(ctx, action).await,
        Command::Config { action } => config::run(ctx, action),
    }
}

/// Print a success alert, or turn an error alert into a failing exit
pub fn finish(alert: &UserAlert) -> Result<()> {
    if alert.is_error() {
        anyhow::bail!("{alert}");
    }
    println!("✓ {alert}");
    Ok(())
}
