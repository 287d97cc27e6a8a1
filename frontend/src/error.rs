//! # Errors
//!
//! Error types surfaced by the client core and the alert model the screens
//! show the user when something goes wrong.

use std::fmt;

/// Failure talking to the pregnancy diary service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("not signed in")]
    NotAuthenticated,
}

impl ApiError {
    /// True for non-2xx responses, as opposed to transport failures
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }

    /// Message the server attached to a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Form validation failures, displayed verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Vui lòng điền đầy đủ thông tin")]
    MissingFields,
    #[error("Email không hợp lệ")]
    InvalidEmail,
    #[error("Tên người dùng phải có ít nhất 3 ký tự")]
    UsernameTooShort,
    #[error("Mật khẩu phải có ít nhất 6 ký tự")]
    PasswordTooShort,
    #[error("Mật khẩu xác nhận không khớp")]
    PasswordMismatch,
    #[error("Vui lòng chấp nhận điều khoản sử dụng")]
    TermsNotAccepted,
    #[error("Ngày dự sinh không hợp lệ (YYYY-MM-DD)")]
    InvalidDueDate,
    #[error("Tuần thai phải là số từ 1 đến 42")]
    InvalidPregnancyWeek,
    #[error("Vui lòng nhập tên bé")]
    MissingBabyName,
    #[error("Vui lòng chọn giới tính (Nam/Nữ)")]
    InvalidGender,
}

pub const TITLE_ERROR: &str = "Lỗi";
pub const TITLE_SUCCESS: &str = "Thành công";
pub const GENERIC_ERROR: &str = "Có lỗi xảy ra";
pub const NOT_SIGNED_IN: &str = "Bạn chưa đăng nhập";

/// A titled message box shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(TITLE_ERROR, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(TITLE_SUCCESS, message)
    }

    /// The catch-all "Lỗi / Có lỗi xảy ra" alert
    pub fn generic() -> Self {
        Self::error(GENERIC_ERROR)
    }

    /// Alert for a failed service call: the server's own message when it sent
    /// one, otherwise the catch-all
    pub fn from_api_error(err: &ApiError) -> Self {
        match err {
            ApiError::NotAuthenticated => Self::error(NOT_SIGNED_IN),
            _ => err
                .server_message()
                .map(Self::error)
                .unwrap_or_else(Self::generic),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == TITLE_ERROR
    }
}

impl From<ValidationError> for UserAlert {
    fn from(err: ValidationError) -> Self {
        UserAlert::error(err.to_string())
    }
}

impl fmt::Display for UserAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
