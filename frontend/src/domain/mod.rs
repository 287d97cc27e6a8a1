//! # Domain
//!
//! Pure client-side rules with no I/O: the pregnancy timeline arithmetic,
//! the session gate, the article catalog and form validation.

pub mod articles;
pub mod session_gate;
pub mod timeline;
pub mod validation;

pub use articles::{category_display_name, ArticleCategory};
pub use session_gate::{profile_is_complete, ProfileCheck, Route, SessionGate};
pub use timeline::{countdown_digits, months_for_weeks, PregnancyTimeline};
