//! # Home State Module
//!
//! State behind the home dashboard: the session gate, the signed-in user's
//! profile, the pregnancy timeline and the seven-day date strip.
//!
//! ## Loading flow:
//! 1. No stored token: settle on `Unauthenticated` without touching the network
//! 2. Otherwise fetch the profile and the countdown concurrently and wait for both
//! 3. The profile result settles the gate; a failed fetch sends the user to login
//! 4. The countdown feeds the timeline; if it fails the timeline is rebuilt
//!    from the profile, or left at zero

use chrono::NaiveDate;
use shared::UserProfile;
use tracing::{error, info, warn};

use crate::domain::session_gate::{ProfileCheck, Route, SessionGate};
use crate::domain::timeline::PregnancyTimeline;
use crate::services::api::PregnancyApi;
use crate::services::date_utils::{week_strip, TODAY_INDEX};
use crate::services::session::SessionContext;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub gate: SessionGate,
    pub profile: Option<UserProfile>,
    pub timeline: PregnancyTimeline,
    pub week_strip: [u32; 7],
}

impl HomeState {
    /// Initial state shown while the session check runs
    pub fn loading(today: NaiveDate) -> Self {
        Self {
            gate: SessionGate::Loading,
            profile: None,
            timeline: PregnancyTimeline::default(),
            week_strip: week_strip(today),
        }
    }

    pub async fn load(api: &dyn PregnancyApi, session: &SessionContext, today: NaiveDate) -> Self {
        let mut state = Self::loading(today);

        let Some(token) = session.token().await else {
            warn!("No session token, redirecting to login");
            state.gate = state.gate.without_token();
            return state;
        };

        let (profile, countdown) = tokio::join!(api.current_user(&token), api.countdown(&token));

        state.gate = state.gate.with_profile(ProfileCheck::of(&profile));
        match profile {
            Ok(user) => {
                session.cache_profile(user.clone()).await;
                state.profile = Some(user);
            }
            Err(e) => error!("Failed to load user profile: {}", e),
        }

        state.timeline = match countdown {
            Ok(countdown) => PregnancyTimeline::from_countdown(&countdown),
            Err(e) => {
                warn!("Failed to load countdown: {}", e);
                fallback_timeline(state.profile.as_ref(), today)
            }
        };

        info!("🏠 Home settled as {:?} at week {}", state.gate, state.timeline.weeks);
        state
    }

    pub fn is_loading(&self) -> bool {
        !self.gate.is_settled()
    }

    pub fn route(&self) -> Option<Route> {
        self.gate.route()
    }

    pub fn today(&self) -> u32 {
        self.week_strip[TODAY_INDEX]
    }

    pub fn countdown_digits(&self) -> Vec<u8> {
        self.timeline.countdown_digits()
    }
}

/// Timeline from the profile alone: whole weeks plus the days left to the
/// due date, the due date on its own, or zero
fn fallback_timeline(profile: Option<&UserProfile>, today: NaiveDate) -> PregnancyTimeline {
    let Some(profile) = profile else {
        return PregnancyTimeline::default();
    };

    match (profile.pregnancy_week, profile.due_date) {
        (Some(week), due_date) => {
            let days_left = due_date
                .map(|due| (due - today).num_days().max(0))
                .and_then(|days| u32::try_from(days).ok())
                .unwrap_or(0);
            PregnancyTimeline::from_week(week).with_days_left(days_left)
        }
        (None, Some(due_date)) => PregnancyTimeline::from_due_date(due_date, today),
        (None, None) => PregnancyTimeline::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::{complete_user, signed_in_session, FakeApi};
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_no_token_goes_to_login_without_calls() {
        let api = FakeApi::default();
        let session = SessionContext::in_memory();

        let state = HomeState::load(&api, &session, today()).await;

        assert_eq!(state.route(), Some(Route::Login));
        assert!(api.calls().is_empty());
        assert_eq!(state.week_strip, [29, 30, 31, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_complete_profile_renders_dashboard() {
        let api = FakeApi::default();
        let session = signed_in_session().await;

        let state = HomeState::load(&api, &session, today()).await;

        assert_eq!(state.route(), Some(Route::Dashboard));
        let expected = PregnancyTimeline { weeks: 32, days: 3, months: 8, days_left: 53 };
        assert_eq!(state.timeline, expected);
        assert_eq!(state.countdown_digits(), vec![0, 5, 3]);
        assert_eq!(state.today(), 1);
        assert_eq!(session.cached_profile().await, Some(complete_user()));

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, vec!["countdown", "current_user"]);
    }

    #[tokio::test]
    async fn test_profile_and_countdown_load_concurrently() {
        // each call waits until the other has started, so sequential
        // fetching never finishes
        let api = FakeApi { rendezvous: Some(Barrier::new(2)), ..FakeApi::default() };
        let session = signed_in_session().await;

        let load = HomeState::load(&api, &session, today());
        let state = tokio::time::timeout(Duration::from_secs(5), load)
            .await
            .expect("profile and countdown requests did not overlap");

        assert_eq!(state.route(), Some(Route::Dashboard));
        assert_eq!(state.timeline.days_left, 53);
    }

    #[tokio::test]
    async fn test_incomplete_profile_goes_to_fill_info() {
        let api = FakeApi::default();
        let mut user = complete_user();
        user.baby = None;
        *api.user.lock().unwrap() = Some(user);
        let session = signed_in_session().await;

        let state = HomeState::load(&api, &session, today()).await;
        assert_eq!(state.route(), Some(Route::FillInfo));
    }

    #[tokio::test]
    async fn test_profile_failure_goes_to_login() {
        let api = FakeApi::default();
        *api.user.lock().unwrap() = None;
        let session = signed_in_session().await;

        let state = HomeState::load(&api, &session, today()).await;
        assert_eq!(state.gate, SessionGate::Unauthenticated);
        assert_eq!(state.profile, None);
    }

    #[tokio::test]
    async fn test_expired_token_goes_to_login() {
        let api = FakeApi::default();
        let session = SessionContext::in_memory();
        session.sign_in("stale", None).await.unwrap();

        let state = HomeState::load(&api, &session, today()).await;
        assert_eq!(state.route(), Some(Route::Login));
        assert_eq!(state.timeline, PregnancyTimeline::default());
    }

    #[tokio::test]
    async fn test_countdown_failure_falls_back_to_profile() {
        let api = FakeApi { countdown: None, ..FakeApi::default() };
        let session = signed_in_session().await;

        let state = HomeState::load(&api, &session, today()).await;

        assert_eq!(state.route(), Some(Route::Dashboard));
        let expected = PregnancyTimeline { weeks: 32, days: 0, months: 8, days_left: 53 };
        assert_eq!(state.timeline, expected);
    }

    #[test]
    fn test_fallback_timeline_variants() {
        assert_eq!(fallback_timeline(None, today()), PregnancyTimeline::default());

        let mut due_only = complete_user();
        due_only.pregnancy_week = None;
        let timeline = fallback_timeline(Some(&due_only), today());
        assert_eq!((timeline.weeks, timeline.days, timeline.days_left), (32, 3, 53));

        let mut week_only = complete_user();
        week_only.due_date = None;
        let timeline = fallback_timeline(Some(&week_only), today());
        assert_eq!((timeline.weeks, timeline.days_left), (32, 0));
    }

    #[test]
    fn test_loading_state() {
        let state = HomeState::loading(today());
        assert!(state.is_loading());
        assert_eq!(state.route(), None);
    }
}
