//! # me-bau client core
//!
//! Everything the pregnancy diary screens need apart from rendering:
//!
//! - **config**: YAML settings for the API endpoint, token file and logging
//! - **error**: API and validation errors plus the alert model
//! - **services**: HTTP client, session/token storage, date helpers, logging
//! - **domain**: timeline arithmetic, session gate, article catalog, validation
//! - **state**: one state model per screen (home, articles, diary, account, fill-info)
//!
//! Screens never reach for global storage. They are handed a
//! [`services::SessionContext`] and a [`services::PregnancyApi`] and do all
//! their I/O through those.

pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, UserAlert, ValidationError};
pub use services::{ApiClient, PregnancyApi, SessionContext};
