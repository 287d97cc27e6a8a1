//! Form validation for login, registration and the pregnancy info form.
//! Checks run in the order the forms show their errors; the first failure wins.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::Gender;

use crate::error::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PREGNANCY_WEEK: u32 = 42;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Registration form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl RegisterForm {
    /// Whether the submit button should be enabled
    pub fn is_form_valid(&self) -> bool {
        !self.username.is_empty()
            && !self.email.is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.accept_terms
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.username.chars().count() < MIN_USERNAME_CHARS {
            return Err(ValidationError::UsernameTooShort);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.accept_terms {
            return Err(ValidationError::TermsNotAccepted);
        }
        Ok(())
    }
}

pub fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDueDate)
}

pub fn parse_pregnancy_week(value: &str) -> Result<u32, ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(week) if (1..=MAX_PREGNANCY_WEEK).contains(&week) => Ok(week),
        _ => Err(ValidationError::InvalidPregnancyWeek),
    }
}

pub fn parse_gender(value: &str) -> Result<Gender, ValidationError> {
    Gender::parse(value).ok_or(ValidationError::InvalidGender)
}
