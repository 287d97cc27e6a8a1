//! # Session Gate
//!
//! Decides where a screen that needs a complete profile should go once the
//! session check settles:
//!
//! ```text
//! Loading ──no token──────────────► Unauthenticated   (login)
//!    │    ──profile fetch failed──► Unauthenticated   (login)
//!    │    ──profile incomplete────► ProfileIncomplete (fill-info)
//!    └──────profile complete──────► Ready             (dashboard)
//! ```
//!
//! A settled gate never goes back to `Loading`.

use shared::UserProfile;

/// Where the client should navigate next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    FillInfo,
    Dashboard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionGate {
    #[default]
    Loading,
    Unauthenticated,
    ProfileIncomplete,
    Ready,
}

/// Outcome of the profile fetch as far as the gate cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCheck {
    Complete,
    Incomplete,
    Failed,
}

impl ProfileCheck {
    pub fn of<E>(result: &Result<UserProfile, E>) -> Self {
        match result {
            Ok(profile) if profile_is_complete(profile) => ProfileCheck::Complete,
            Ok(_) => ProfileCheck::Incomplete,
            Err(_) => ProfileCheck::Failed,
        }
    }
}

impl SessionGate {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionGate::Loading)
    }

    /// Navigation target, `None` while still loading
    pub fn route(&self) -> Option<Route> {
        match self {
            SessionGate::Loading => None,
            SessionGate::Unauthenticated => Some(Route::Login),
            SessionGate::ProfileIncomplete => Some(Route::FillInfo),
            SessionGate::Ready => Some(Route::Dashboard),
        }
    }

    /// Settle the gate when no token is stored
    pub fn without_token(self) -> Self {
        self.settle(SessionGate::Unauthenticated)
    }

    /// Settle the gate from the result of the profile fetch
    pub fn with_profile(self, check: ProfileCheck) -> Self {
        let next = match check {
            ProfileCheck::Complete => SessionGate::Ready,
            ProfileCheck::Incomplete => SessionGate::ProfileIncomplete,
            ProfileCheck::Failed => SessionGate::Unauthenticated,
        };
        self.settle(next)
    }

    fn settle(self, next: SessionGate) -> Self {
        if self.is_settled() {
            self
        } else {
            next
        }
    }
}

/// A profile is complete once it has a due date, a baby name and a non-zero
/// pregnancy week
pub fn profile_is_complete(profile: &UserProfile) -> bool {
    profile.due_date.is_some()
        && !profile.baby_name().trim().is_empty()
        && profile.pregnancy_week.unwrap_or(0) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{Baby, Gender};

    fn complete_profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Lan".to_string(),
            email: "lan@example.com".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 12, 1),
            pregnancy_week: Some(20),
            baby: Some(Baby { name: "Bông".to_string(), gender: Some(Gender::Nu) }),
        }
    }

    #[test]
    fn test_no_token_goes_to_login() {
        let gate = SessionGate::default().without_token();
        assert_eq!(gate, SessionGate::Unauthenticated);
        assert_eq!(gate.route(), Some(Route::Login));
    }

    #[test]
    fn test_profile_outcomes() {
        let ready = SessionGate::Loading.with_profile(ProfileCheck::Complete);
        assert_eq!(ready.route(), Some(Route::Dashboard));

        let incomplete = SessionGate::Loading.with_profile(ProfileCheck::Incomplete);
        assert_eq!(incomplete.route(), Some(Route::FillInfo));

        let failed = SessionGate::Loading.with_profile(ProfileCheck::Failed);
        assert_eq!(failed.route(), Some(Route::Login));
    }

    #[test]
    fn test_loading_has_no_route() {
        assert!(!SessionGate::Loading.is_settled());
        assert_eq!(SessionGate::Loading.route(), None);
    }

    #[test]
    fn test_settled_gate_does_not_move() {
        let gate = SessionGate::Loading.with_profile(ProfileCheck::Complete);
        assert_eq!(gate.with_profile(ProfileCheck::Failed), SessionGate::Ready);
        assert_eq!(gate.without_token(), SessionGate::Ready);
    }

    #[test]
    fn test_profile_completeness() {
        assert!(profile_is_complete(&complete_profile()));

        let mut no_due = complete_profile();
        no_due.due_date = None;
        assert!(!profile_is_complete(&no_due));

        let mut no_baby = complete_profile();
        no_baby.baby = None;
        assert!(!profile_is_complete(&no_baby));

        let mut blank_name = complete_profile();
        blank_name.baby = Some(Baby { name: "  ".to_string(), gender: None });
        assert!(!profile_is_complete(&blank_name));

        let mut week_zero = complete_profile();
        week_zero.pregnancy_week = Some(0);
        assert!(!profile_is_complete(&week_zero));
    }

    #[test]
    fn test_profile_check_of_result() {
        let ok: Result<UserProfile, ()> = Ok(complete_profile());
        assert_eq!(ProfileCheck::of(&ok), ProfileCheck::Complete);

        let partial: Result<UserProfile, ()> = Ok(UserProfile::default());
        assert_eq!(ProfileCheck::of(&partial), ProfileCheck::Incomplete);

        let err: Result<UserProfile, ()> = Err(());
        assert_eq!(ProfileCheck::of(&err), ProfileCheck::Failed);
    }
}
