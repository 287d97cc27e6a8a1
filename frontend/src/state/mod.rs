//! # State Module
//!
//! One state model per screen. Each model receives the API and the session
//! context explicitly and reports results as alerts and navigation targets;
//! rendering is left to whichever front end drives it.

pub mod article_state;
pub mod auth_state;
pub mod diary_state;
pub mod fill_info_state;
pub mod home_state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use article_state::ArticleListState;
pub use auth_state::{LoginState, ProfileForm, RegisterState};
pub use diary_state::{DiaryState, EditDraft};
pub use fill_info_state::FillInfoForm;
pub use home_state::HomeState;

use crate::domain::session_gate::Route;
use crate::error::UserAlert;

/// Result of a submitted form: the alert to show and where to go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub alert: UserAlert,
    pub route: Option<Route>,
}

impl ActionOutcome {
    pub fn alert(alert: UserAlert) -> Self {
        Self { alert, route: None }
    }

    pub fn navigate(alert: UserAlert, route: Route) -> Self {
        Self {
            alert,
            route: Some(route),
        }
    }
}
