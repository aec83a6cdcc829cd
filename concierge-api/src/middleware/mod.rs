pub mod auth;

pub use auth::{console_auth_middleware, ConsoleClaims};
