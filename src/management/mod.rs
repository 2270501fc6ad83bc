mod auth;

pub use auth::TokenManager;
pub use auth::basic_auth_header;
