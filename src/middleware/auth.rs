use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims, Role, TokenService};
use crate::error::ApiError;

/// Authenticated caller context extracted from a verified token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            role: claims.role,
        }
    }
}

/// Require a valid bearer token; reject with 401 otherwise.
pub async fn require_auth(
    State(tokens): State<TokenService>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&tokens, &params, &headers)?;
    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Require a valid bearer token carrying the administrator role.
///
/// A bad token is a 401; a good token with the wrong role is a 403.
pub async fn require_admin(
    State(tokens): State<TokenService>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&tokens, &params, &headers)?;
    if !claims.role.is_admin() {
        tracing::warn!(email = %claims.sub, role = %claims.role, "administrator route denied");
        return Err(AuthError::InsufficientRole.into());
    }
    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Single verification attempt per request; failures are logged, never
/// retried.
fn authenticate(
    tokens: &TokenService,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
) -> Result<Claims, ApiError> {
    extract_token(params, headers)
        .ok_or(AuthError::MissingToken)
        .and_then(|token| tokens.verify(&token))
        .map_err(|e| {
            tracing::warn!("authentication failed: {}", e);
            e.into()
        })
}

/// Pull the raw token out of the request. The `token` query parameter wins
/// over the Authorization header when both are present. Extraction is a
/// plain string operation; trust decisions happen in verification.
fn extract_token(params: &HashMap<String, String>, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = params.get("token") {
        if !token.is_empty() {
            return Some(token.clone());
        }
    }

    let header = headers.get("authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const SECRET: &str = "guard-test-secret";

    fn tokens() -> TokenService {
        TokenService::new(SECRET, 60).unwrap()
    }

    fn admin_app(tokens: TokenService) -> Router {
        Router::new()
            .route("/guarded", get(|| async { "through" }))
            .route_layer(from_fn_with_state(tokens, require_admin))
    }

    fn auth_app(tokens: TokenService) -> Router {
        Router::new()
            .route("/guarded", get(|| async { "through" }))
            .route_layer(from_fn_with_state(tokens, require_auth))
    }

    fn get_request(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn bearer_request(uri: &str, token: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let response = admin_app(tokens())
            .oneshot(get_request("/guarded"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message_type"], "error");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn valid_non_admin_token_is_forbidden() {
        let tokens = tokens();
        let token = tokens.issue("vet@clinic.test", Role::Employee).unwrap();
        let response = admin_app(tokens)
            .oneshot(bearer_request("/guarded", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_token_reaches_the_wrapped_handler() {
        let tokens = tokens();
        let token = tokens.issue("boss@clinic.test", Role::Administrator).unwrap();
        let response = admin_app(tokens)
            .oneshot(bearer_request("/guarded", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn any_role_passes_the_authenticated_tier() {
        let tokens = tokens();
        let token = tokens.issue("desk@clinic.test", Role::Receptionist).unwrap();
        let response = auth_app(tokens)
            .oneshot(bearer_request("/guarded", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let stale = TokenService::new(SECRET, -5).unwrap();
        let token = stale.issue("vet@clinic.test", Role::Administrator).unwrap();
        let response = admin_app(tokens())
            .oneshot(bearer_request("/guarded", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_is_accepted_via_query_parameter() {
        let tokens = tokens();
        let token = tokens.issue("boss@clinic.test", Role::Administrator).unwrap();
        let response = admin_app(tokens)
            .oneshot(get_request(&format!("/guarded?token={}", token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn query_parameter_wins_over_the_header() {
        let tokens = tokens();
        let token = tokens.issue("boss@clinic.test", Role::Administrator).unwrap();
        let request = HttpRequest::builder()
            .uri(format!("/guarded?token={}", token))
            .header("Authorization", "Bearer garbage")
            .body(Body::empty())
            .unwrap();
        let response = admin_app(tokens).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
