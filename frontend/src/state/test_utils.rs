//! In-memory `PregnancyApi` used by the screen state tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    Article, Baby, CountdownResponse, Diary, DiaryDraft, Gender, LoginRequest, LoginResponse,
    UpdatePregnancyInfoRequest, UpdateProfileRequest, UserProfile,
};
use std::sync::Mutex;
use tokio::sync::Barrier;

use crate::error::ApiError;
use crate::services::api::PregnancyApi;
use crate::services::session::{SessionContext, SessionToken};

pub const GOOD_TOKEN: &str = "good-token";
pub const GOOD_PASSWORD: &str = "secret1";

/// Scriptable fake service. `None` responses answer with a rejection;
/// `offline` makes every call fail as if the connection dropped. With a
/// `rendezvous`, the profile and countdown calls each wait at the barrier
/// until the other one has started.
pub struct FakeApi {
    pub user: Mutex<Option<UserProfile>>,
    pub countdown: Option<CountdownResponse>,
    pub articles: Option<Vec<Article>>,
    pub diaries: Mutex<Option<Vec<Diary>>>,
    pub reject_mutations: bool,
    pub offline: bool,
    pub rendezvous: Option<Barrier>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            user: Mutex::new(Some(complete_user())),
            countdown: Some(CountdownResponse { weeks: 32, days: 3, months: None, days_left: 53 }),
            articles: Some(Vec::new()),
            diaries: Mutex::new(Some(Vec::new())),
            reject_mutations: false,
            offline: false,
            rendezvous: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn meet(&self) {
        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.into());
        if self.offline {
            Err(ApiError::Decode("connection closed".to_string()))
        } else {
            Ok(())
        }
    }

    fn authorize(&self, token: &SessionToken) -> Result<(), ApiError> {
        if token.as_str() == GOOD_TOKEN {
            Ok(())
        } else {
            Err(rejected(401, "Unauthorized"))
        }
    }

    fn check_mutation(&self) -> Result<(), ApiError> {
        if self.reject_mutations {
            Err(rejected(500, "Lỗi máy chủ"))
        } else {
            Ok(())
        }
    }
}

pub fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Status { status, message: message.to_string() }
}

pub fn complete_user() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Lan".to_string(),
        email: "lan@example.com".to_string(),
        due_date: NaiveDate::from_ymd_opt(2025, 7, 24),
        pregnancy_week: Some(32),
        baby: Some(Baby { name: "Bông".to_string(), gender: Some(Gender::Nu) }),
    }
}

pub fn diary(id: &str, title: &str, content: &str) -> Diary {
    Diary {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: "2025-06-01T08:00:00.000Z".to_string(),
    }
}

pub async fn signed_in_session() -> SessionContext {
    let session = SessionContext::in_memory();
    session.sign_in(GOOD_TOKEN, None).await.unwrap();
    session
}

#[async_trait]
impl PregnancyApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login")?;
        if request.password != GOOD_PASSWORD {
            return Err(rejected(401, "Sai thông tin"));
        }
        let user = self.user.lock().unwrap().clone();
        Ok(LoginResponse { access_token: GOOD_TOKEN.to_string(), user })
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        self.meet().await;
        self.record("current_user")?;
        self.authorize(token)?;
        self.user.lock().unwrap().clone().ok_or_else(|| rejected(404, "Không tìm thấy"))
    }

    async fn update_profile(
        &self,
        token: &SessionToken,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        self.record("update_profile")?;
        self.authorize(token)?;
        self.check_mutation()?;
        let mut guard = self.user.lock().unwrap();
        let mut user = guard.clone().unwrap_or_default();
        user.name = request.name.clone();
        user.due_date = shared::parse_service_date(&request.due_date);
        user.pregnancy_week = request.pregnancy_week;
        user.baby = Some(request.baby.clone());
        *guard = Some(user.clone());
        Ok(user)
    }

    async fn update_pregnancy_info(
        &self,
        token: &SessionToken,
        request: &UpdatePregnancyInfoRequest,
    ) -> Result<(), ApiError> {
        self.record("update_pregnancy_info")?;
        self.authorize(token)?;
        if self.reject_mutations {
            return Err(rejected(400, "Ngày dự sinh không hợp lệ"));
        }
        let mut guard = self.user.lock().unwrap();
        let mut user = guard.clone().unwrap_or_default();
        user.due_date = shared::parse_service_date(&request.due_date);
        user.pregnancy_week = Some(request.pregnancy_week);
        user.baby = Some(Baby { name: request.baby_name.clone(), gender: Some(request.gender) });
        *guard = Some(user);
        Ok(())
    }

    async fn countdown(&self, token: &SessionToken) -> Result<CountdownResponse, ApiError> {
        self.meet().await;
        self.record("countdown")?;
        self.authorize(token)?;
        self.countdown.clone().ok_or_else(|| rejected(500, "Lỗi máy chủ"))
    }

    async fn articles(
        &self,
        token: &SessionToken,
        category: &str,
    ) -> Result<Vec<Article>, ApiError> {
        self.record(format!("articles:{}", category))?;
        self.authorize(token)?;
        let articles = self.articles.clone().ok_or_else(|| rejected(500, "Lỗi máy chủ"))?;
        Ok(articles.into_iter().filter(|a| a.category == category).collect())
    }

    async fn diaries(&self, token: &SessionToken) -> Result<Vec<Diary>, ApiError> {
        self.record("diaries")?;
        self.authorize(token)?;
        self.diaries.lock().unwrap().clone().ok_or_else(|| rejected(500, "Lỗi máy chủ"))
    }

    async fn create_diary(
        &self,
        token: &SessionToken,
        draft: &DiaryDraft,
    ) -> Result<Diary, ApiError> {
        self.record("create_diary")?;
        self.authorize(token)?;
        self.check_mutation()?;
        let mut guard = self.diaries.lock().unwrap();
        let entries = guard.get_or_insert_with(Vec::new);
        let created = diary(&format!("d{}", entries.len() + 100), &draft.title, &draft.content);
        entries.insert(0, created.clone());
        Ok(created)
    }

    async fn update_diary(
        &self,
        token: &SessionToken,
        id: &str,
        draft: &DiaryDraft,
    ) -> Result<(), ApiError> {
        self.record(format!("update_diary:{}", id))?;
        self.authorize(token)?;
        self.check_mutation()?;
        let mut guard = self.diaries.lock().unwrap();
        let entry = guard
            .as_mut()
            .and_then(|entries| entries.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| rejected(404, "Không tìm thấy"))?;
        entry.title = draft.title.clone();
        entry.content = draft.content.clone();
        Ok(())
    }

    async fn delete_diary(&self, token: &SessionToken, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_diary:{}", id))?;
        self.authorize(token)?;
        self.check_mutation()?;
        if let Some(entries) = self.diaries.lock().unwrap().as_mut() {
            entries.retain(|d| d.id != id);
        }
        Ok(())
    }
}
