//! Authentication middleware
//!
//! Verifies access tokens issued by the external auth service and exposes
//! the caller's identity and roles to handlers.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult, ErrorDetail, ErrorResponse};
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<UserRole>,
}

impl AuthUser {
    /// Admins and managers may delete catalog entries and manage categories
    pub fn can_manage_catalog(&self) -> bool {
        self.roles.iter().any(UserRole::can_manage_catalog)
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authentication middleware that validates bearer tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(token) => token,
        None => {
            return AppError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response()
        }
    };

    let auth_user = match verify_token(token, &state.config.jwt) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    tracing::debug!(user_id = %auth_user.user_id, email = ?auth_user.email, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Decode and validate a token, returning the user it identifies
pub fn verify_token(token: &str, config: &JwtConfig) -> AppResult<AuthUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Audience values are the auth service's concern
    validation.validate_aud = false;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()))?;

    // Roles this dashboard does not know about carry no permissions
    let roles = claims
        .roles
        .iter()
        .filter_map(|r| r.parse::<UserRole>().ok())
        .collect();

    Ok(AuthUser {
        user_id,
        email: claims.email,
        roles,
    })
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

/// Role guard for catalog writes restricted to admins and managers
pub fn require_catalog_manager(user: &AuthUser) -> AppResult<()> {
    if user.can_manage_catalog() {
        Ok(())
    } else {
        Err(AppError::InsufficientPermissions)
    }
}
