//! # Auth State Module
//!
//! State for the account screen (login, profile view and edit, logout) and
//! for the registration form.
//!
//! ## Responsibilities:
//! - Validate credentials before calling the service
//! - Persist the token through the injected session on login, clear it on logout
//! - Keep an edit form in sync with the signed-in user's profile
//! - Map service outcomes to the alerts the screen shows

use shared::{Baby, Gender, LoginRequest, UpdateProfileRequest, UserProfile};
use tracing::{error, info, warn};

use crate::domain::session_gate::Route;
use crate::domain::validation::{validate_login, RegisterForm};
use crate::error::UserAlert;
use crate::services::api::PregnancyApi;
use crate::services::date_utils::format_form_date;
use crate::services::session::SessionContext;
use crate::state::ActionOutcome;

/// Profile editing form, all fields as typed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    /// YYYY-MM-DD
    pub due_date: String,
    pub pregnancy_week: String,
    pub baby_name: String,
    pub baby_gender: String,
}

impl ProfileForm {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            name: user.name.clone(),
            due_date: user.due_date.map(format_form_date).unwrap_or_default(),
            pregnancy_week: user.pregnancy_week.map(|w| w.to_string()).unwrap_or_default(),
            baby_name: user.baby_name().to_string(),
            baby_gender: user.baby_gender().map(|g| g.to_string()).unwrap_or_default(),
        }
    }

    /// Request body; a week that is not an integer is sent as null
    pub fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: self.name.clone(),
            due_date: self.due_date.trim().to_string(),
            pregnancy_week: self.pregnancy_week.trim().parse().ok(),
            baby: Baby {
                name: self.baby_name.clone(),
                gender: Gender::parse(&self.baby_gender),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub password_visible: bool,
    pub logged_in: bool,
    pub user: Option<UserProfile>,
    pub is_editing: bool,
    pub profile_form: ProfileForm,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    fn set_user(&mut self, user: Option<UserProfile>) {
        self.profile_form = user.as_ref().map(ProfileForm::from_user).unwrap_or_default();
        self.user = user;
    }

    /// Pick up an existing session on screen start. A stored token counts as
    /// logged in even if the profile fetch fails.
    pub async fn restore(&mut self, api: &dyn PregnancyApi, session: &SessionContext) {
        let Some(token) = session.token().await else {
            return;
        };
        self.logged_in = true;

        match api.current_user(&token).await {
            Ok(user) => {
                session.cache_profile(user.clone()).await;
                self.set_user(Some(user));
            }
            Err(e) => error!("Error fetching user profile: {}", e),
        }
    }

    pub async fn login(&mut self, api: &dyn PregnancyApi, session: &SessionContext) -> UserAlert {
        if let Err(e) = validate_login(&self.email, &self.password) {
            return e.into();
        }

        let request = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        match api.login(&request).await {
            Ok(response) => {
                let user = response.user.clone();
                if let Err(e) = session.sign_in(&response.access_token, user).await {
                    error!("Failed to store session token: {:#}", e);
                    return UserAlert::error("Có lỗi xảy ra khi đăng nhập");
                }
                info!("✅ Logged in as {}", self.email);
                self.logged_in = true;
                self.set_user(response.user);
                UserAlert::success("Đăng nhập thành công!")
            }
            Err(e) if e.is_rejection() => {
                warn!("Login rejected: {}", e);
                UserAlert::error("Sai thông tin đăng nhập")
            }
            Err(e) => {
                error!("Login error: {}", e);
                UserAlert::error("Có lỗi xảy ra khi đăng nhập")
            }
        }
    }

    pub fn begin_edit(&mut self) {
        self.is_editing = true;
    }

    pub fn cancel_edit(&mut self) {
        self.is_editing = false;
        self.profile_form = self.user.as_ref().map(ProfileForm::from_user).unwrap_or_default();
    }

    /// Submit the profile form; success closes the editor and heads to the
    /// dashboard
    pub async fn update_profile(
        &mut self,
        api: &dyn PregnancyApi,
        session: &SessionContext,
    ) -> ActionOutcome {
        let token = match session.require_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Profile update without a session: {}", e);
                return ActionOutcome::alert(UserAlert::error("Có lỗi xảy ra khi cập nhật"));
            }
        };

        match api.update_profile(&token, &self.profile_form.to_request()).await {
            Ok(user) => {
                session.cache_profile(user.clone()).await;
                self.set_user(Some(user));
                self.is_editing = false;
                let alert = UserAlert::success("Cập nhật thông tin thành công");
                ActionOutcome::navigate(alert, Route::Dashboard)
            }
            Err(e) if e.is_rejection() => {
                warn!("Profile update rejected: {}", e);
                ActionOutcome::alert(UserAlert::error("Cập nhật thất bại"))
            }
            Err(e) => {
                error!("Profile update error: {}", e);
                ActionOutcome::alert(UserAlert::error("Có lỗi xảy ra khi cập nhật"))
            }
        }
    }

    pub async fn logout(&mut self, session: &SessionContext) -> anyhow::Result<()> {
        session.sign_out().await?;
        *self = Self::new();
        Ok(())
    }
}

/// Registration form with its visibility toggles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub password_visible: bool,
    pub confirm_password_visible: bool,
}

impl RegisterState {
    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.confirm_password_visible = !self.confirm_password_visible;
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_form_valid()
    }

    pub fn submit(&self) -> UserAlert {
        match self.form.validate() {
            Ok(()) => {
                info!("Registration form accepted for {}", self.form.email);
                UserAlert::success("Đăng ký tài khoản thành công!")
            }
            Err(e) => e.into(),
        }
    }
}
