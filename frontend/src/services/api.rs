use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Article, ArticleListResponse, CountdownResponse, Diary, DiaryDraft, DiaryListResponse,
    DiaryResponse, ErrorResponse, LoginRequest, LoginResponse, UpdatePregnancyInfoRequest,
    UpdateProfileRequest, UserProfile, UserResponse,
};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::services::session::SessionToken;

/// Operations the pregnancy diary service offers to the client
#[async_trait]
pub trait PregnancyApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError>;

    async fn update_profile(
        &self,
        token: &SessionToken,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError>;

    async fn update_pregnancy_info(
        &self,
        token: &SessionToken,
        request: &UpdatePregnancyInfoRequest,
    ) -> Result<(), ApiError>;

    async fn countdown(&self, token: &SessionToken) -> Result<CountdownResponse, ApiError>;

    async fn articles(
        &self,
        token: &SessionToken,
        category: &str,
    ) -> Result<Vec<Article>, ApiError>;

    async fn diaries(&self, token: &SessionToken) -> Result<Vec<Diary>, ApiError>;

    async fn create_diary(
        &self,
        token: &SessionToken,
        draft: &DiaryDraft,
    ) -> Result<Diary, ApiError>;

    async fn update_diary(
        &self,
        token: &SessionToken,
        id: &str,
        draft: &DiaryDraft,
    ) -> Result<(), ApiError>;

    async fn delete_diary(&self, token: &SessionToken, id: &str) -> Result<(), ApiError>;
}

/// HTTP client for the pregnancy diary service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Build a client for the configured service, trailing `/` ignored
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&SessionToken>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Turn non-2xx responses into `ApiError::Status`, keeping the server's
    /// `{error}` / `{message}` text when it sent one
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| body.trim().to_string());
        warn!("Request rejected with {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&SessionToken>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = Self::check(builder.send().await?).await?;
        Self::decode(response).await
    }

    async fn send_ignoring_body<B>(
        &self,
        method: Method,
        path: &str,
        token: &SessionToken,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut builder = self.request(method, path, Some(token));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Self::check(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl PregnancyApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send_json(Method::POST, "/api/auth/login", None, Some(request)).await
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        let response: UserResponse = self
            .send_json::<(), _>(Method::POST, "/api/auth/me", Some(token), None)
            .await?;
        Ok(response.user)
    }

    async fn update_profile(
        &self,
        token: &SessionToken,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        let response: UserResponse = self
            .send_json(Method::PUT, "/api/auth/update-profile", Some(token), Some(request))
            .await?;
        Ok(response.user)
    }

    async fn update_pregnancy_info(
        &self,
        token: &SessionToken,
        request: &UpdatePregnancyInfoRequest,
    ) -> Result<(), ApiError> {
        self.send_ignoring_body(Method::PUT, "/api/auth/updateInfo", token, Some(request))
            .await
    }

    async fn countdown(&self, token: &SessionToken) -> Result<CountdownResponse, ApiError> {
        self.send_json::<(), _>(Method::GET, "/api/getTimeEnd", Some(token), None)
            .await
    }

    async fn articles(
        &self,
        token: &SessionToken,
        category: &str,
    ) -> Result<Vec<Article>, ApiError> {
        let response = self
            .request(Method::GET, "/api/articles", Some(token))
            .query(&[("category", category)])
            .send()
            .await?;
        let list: ArticleListResponse = Self::decode(Self::check(response).await?).await?;
        Ok(list.article)
    }

    async fn diaries(&self, token: &SessionToken) -> Result<Vec<Diary>, ApiError> {
        let list: DiaryListResponse = self
            .send_json::<(), _>(Method::GET, "/api/diaries", Some(token), None)
            .await?;
        Ok(list.diary)
    }

    async fn create_diary(
        &self,
        token: &SessionToken,
        draft: &DiaryDraft,
    ) -> Result<Diary, ApiError> {
        let response: DiaryResponse = self
            .send_json(Method::POST, "/api/diaries", Some(token), Some(draft))
            .await?;
        Ok(response.diary)
    }

    async fn update_diary(
        &self,
        token: &SessionToken,
        id: &str,
        draft: &DiaryDraft,
    ) -> Result<(), ApiError> {
        self.send_ignoring_body(Method::PUT, &format!("/api/diaries/{}", id), token, Some(draft))
            .await
    }

    async fn delete_diary(&self, token: &SessionToken, id: &str) -> Result<(), ApiError> {
        self.send_ignoring_body::<()>(Method::DELETE, &format!("/api/diaries/{}", id), token, None)
            .await
    }
}
