pub mod auth;
pub mod extract;

pub use auth::CurrentUser;
pub use extract::{ApiForm, ApiJson, ApiPath};
