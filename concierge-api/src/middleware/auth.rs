use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use concierge_core::{Actor, CoreError, Role};

use crate::error::AppError;

pub const ROLE_HEADER: &str = "x-console-role";
pub const USER_HEADER: &str = "x-console-user";

const ANONYMOUS_USER: &str = "console";

/// Who is operating the console for this request
#[derive(Debug, Clone)]
pub struct ConsoleClaims {
    pub user: String,
    pub role: Role,
}

impl ConsoleClaims {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user.clone(), self.role)
    }
}

// ============================================================================
// Console Role Middleware
// ============================================================================

/// Reads the acting role and user name from request headers. The role is
/// trusted as given; there is no credential check.
pub async fn console_auth_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    // 1. Extract role
    let role = req.headers()
        .get(ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError(format!("missing {} header", ROLE_HEADER)))?;

    let role: Role = role
        .parse()
        .map_err(|e: CoreError| AppError::AuthenticationError(e.to_string()))?;

    // 2. Extract display name
    let user = req.headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ANONYMOUS_USER)
        .to_string();

    // 3. Inject claims
    req.extensions_mut().insert(ConsoleClaims { user, role });

    Ok(next.run(req).await)
}
