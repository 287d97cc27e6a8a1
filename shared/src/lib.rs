//! # Shared wire models
//!
//! Request and response types exchanged with the pregnancy diary service.
//!
//! The service is loose about its payloads: ids come as `_id`, dates come
//! either as `YYYY-MM-DD` or as full RFC 3339 timestamps, and numeric fields
//! are sometimes missing, `null` or sent as strings. Everything here
//! deserializes leniently so that a missing value becomes its default rather
//! than a decode failure.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Gender of the baby as the service spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Nam")]
    Nam,
    #[serde(rename = "Nữ")]
    Nu,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Nam => "Nam",
            Gender::Nu => "Nữ",
        }
    }

    /// Parse the service spelling, also accepting the unaccented "Nu"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Nam" | "nam" => Some(Gender::Nam),
            "Nữ" | "nữ" | "Nu" | "nu" => Some(Gender::Nu),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baby details attached to a user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Expected delivery date
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub pregnancy_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baby: Option<Baby>,
}

impl UserProfile {
    /// Baby name, empty when the profile has no baby section
    pub fn baby_name(&self) -> &str {
        self.baby.as_ref().map(|b| b.name.as_str()).unwrap_or("")
    }

    pub fn baby_gender(&self) -> Option<Gender> {
        self.baby.as_ref().and_then(|b| b.gender)
    }
}

/// Credentials posted to the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Envelope returned by the current-user and profile update endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Full profile edit submitted from the account screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    /// `YYYY-MM-DD`, empty when the user cleared it
    pub due_date: String,
    /// `None` when the form text is not an integer
    pub pregnancy_week: Option<u32>,
    pub baby: Baby,
}

/// Pregnancy details submitted from the fill-info form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePregnancyInfoRequest {
    pub due_date: String,
    pub baby_name: String,
    pub gender: Gender,
    pub pregnancy_week: u32,
}

/// Countdown to the due date as computed by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResponse {
    #[serde(default, deserialize_with = "lenient_number")]
    pub weeks: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub days: i64,
    #[serde(
        default,
        deserialize_with = "lenient_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub months: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub days_left: i64,
}

/// Article as listed for a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// URL of the article body
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub article: Vec<Article>,
}

/// A diary entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diary {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub diary: Vec<Diary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryResponse {
    pub diary: Diary,
}

/// Title and content sent when creating or updating a diary entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryDraft {
    pub title: String,
    pub content: String,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

/// Numeric field the service may send as a number, a string or null
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn to_i64(&self) -> Option<i64> {
        match self {
            NumberOrText::Int(n) => Some(*n),
            NumberOrText::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            NumberOrText::Float(_) => None,
            NumberOrText::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_number(deserializer)?.unwrap_or(0))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(NumberOrText::to_i64))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_optional_number(deserializer)?;
    Ok(value.and_then(|n| u32::try_from(n).ok()))
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(Gender::parse))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_service_date))
}

/// Parse a date the way the service sends it: `YYYY-MM-DD` or RFC 3339
pub fn parse_service_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_profile_from_service_payload() {
        let payload = json!({
            "_id": "665f1c",
            "name": "Lan",
            "email": "lan@example.com",
            "dueDate": "2025-12-01T00:00:00.000Z",
            "pregnancyWeek": 32,
            "baby": { "name": "Bông", "gender": "Nữ" }
        });

        let user: UserProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(user.id, "665f1c");
        assert_eq!(user.due_date, NaiveDate::from_ymd_opt(2025, 12, 1));
        assert_eq!(user.pregnancy_week, Some(32));
        assert_eq!(user.baby_name(), "Bông");
        assert_eq!(user.baby_gender(), Some(Gender::Nu));
    }

    #[test]
    fn test_user_profile_missing_pregnancy_fields() {
        let payload =
            json!({ "id": "u1", "name": "Lan", "email": "lan@example.com", "dueDate": null });

        let user: UserProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.due_date, None);
        assert_eq!(user.pregnancy_week, None);
        assert_eq!(user.baby_name(), "");
    }

    #[test]
    fn test_unknown_gender_and_text_week() {
        let payload = json!({
            "_id": "u2",
            "pregnancyWeek": "12",
            "baby": { "name": "Tí", "gender": "" }
        });

        let user: UserProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(user.pregnancy_week, Some(12));
        assert_eq!(user.baby_gender(), None);
    }

    #[test]
    fn test_countdown_defaults_missing_fields_to_zero() {
        let countdown: CountdownResponse =
            serde_json::from_value(json!({ "weeks": 20, "daysLeft": null })).unwrap();

        assert_eq!(countdown.weeks, 20);
        assert_eq!(countdown.days, 0);
        assert_eq!(countdown.months, None);
        assert_eq!(countdown.days_left, 0);
    }

    #[test]
    fn test_null_lists_become_empty() {
        let articles: ArticleListResponse =
            serde_json::from_value(json!({ "article": null })).unwrap();
        let diaries: DiaryListResponse = serde_json::from_value(json!({})).unwrap();

        assert!(articles.article.is_empty());
        assert!(diaries.diary.is_empty());
    }

    #[test]
    fn test_update_info_request_wire_names() {
        let request = UpdatePregnancyInfoRequest {
            due_date: "2025-12-01".to_string(),
            baby_name: "Bông".to_string(),
            gender: Gender::Nu,
            pregnancy_week: 20,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "dueDate": "2025-12-01",
                "babyName": "Bông",
                "gender": "Nữ",
                "pregnancyWeek": 20
            })
        );
    }

    #[test]
    fn test_parse_service_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 13);
        assert_eq!(parse_service_date("2025-06-13"), expected);
        assert_eq!(parse_service_date("2025-06-13T09:00:00-04:00"), expected);
        assert_eq!(parse_service_date("2025-06-13T09:00:00.000Z"), expected);
        assert_eq!(parse_service_date("13/06/2025"), None);
        assert_eq!(parse_service_date(""), None);
    }

    #[test]
    fn test_error_response_message() {
        let body: ErrorResponse =
            serde_json::from_value(json!({ "error": "Token hết hạn" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Token hết hạn"));

        let empty: ErrorResponse = serde_json::from_value(json!({ "message": "  " })).unwrap();
        assert_eq!(empty.into_message(), None);
    }
}
