pub mod api;
pub mod date_utils;
pub mod logging;
pub mod session;

pub use api::{ApiClient, PregnancyApi};
pub use session::{FileTokenStore, MemoryTokenStore, SessionContext, SessionToken, TokenStore};
