use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::TokenService;

/// Shared application dependencies, injected into handlers and guards
/// through the router state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> TokenService {
        state.tokens.clone()
    }
}
