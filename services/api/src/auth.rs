use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::domain::repository::AdminUserRepository;
use crate::domain::types::ClearanceLevel;
use crate::error::ApiError;

/// Admin session lifetime in seconds (24h).
pub const ADMIN_TOKEN_EXP: u64 = 24 * 60 * 60;

// ── Passwords ─────────────────────────────────────────────────────────────────

pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hash password: {e}")))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("parse password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

// ── Tokens ────────────────────────────────────────────────────────────────────

/// JWT claims for admin sessions.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub clearance: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub fn issue_admin_token(
    admin_id: Uuid,
    clearance: ClearanceLevel,
    secret: &str,
) -> Result<String, ApiError> {
    let claims = TokenClaims {
        sub: admin_id.to_string(),
        clearance: clearance.as_str().to_owned(),
        exp: now_secs() + ADMIN_TOKEN_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

pub fn validate_admin_token(token: &str, secret: &str) -> Result<TokenClaims, ApiError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthorized("invalid or expired token"))?;

    Ok(data.claims)
}

// ── Bearer extraction ─────────────────────────────────────────────────────────

/// Raw bearer token pulled from the `Authorization` header. 401 when the
/// header is absent or not in `Bearer <token>` form.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    // The returned future must not borrow from `parts`, so the header is
    // read before the async block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        async move {
            let token = token.ok_or(ApiError::Unauthorized("missing bearer token"))?;
            Ok(Self(token))
        }
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// The acting admin, derived solely from the validated token. Request bodies
/// never carry an admin id.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub clearance: ClearanceLevel,
}

impl AdminIdentity {
    pub fn is_super(&self) -> bool {
        self.clearance == ClearanceLevel::SuperAdmin
    }

    /// Ownership rule: super admins modify anything, regular admins only
    /// rows they created.
    pub fn can_modify(&self, owner: Uuid) -> bool {
        self.is_super() || self.id == owner
    }

    pub fn require_super(&self) -> Result<(), ApiError> {
        if self.is_super() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("super admin access required"))
        }
    }
}

/// Validate a bearer token and load the admin it names.
pub struct AuthorizeAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
    pub jwt_secret: String,
}

impl<R: AdminUserRepository> AuthorizeAdminUseCase<R> {
    pub async fn execute(&self, token: &str) -> Result<AdminIdentity, ApiError> {
        let claims = validate_admin_token(token, &self.jwt_secret)?;
        let admin_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("invalid or expired token"))?;

        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(ApiError::Unauthorized("invalid or expired token"))?;

        if !admin.is_active {
            return Err(ApiError::Forbidden("account is deactivated"));
        }

        // Clearance comes from the row, not the claim, so a demotion takes
        // effect before the token expires.
        Ok(AdminIdentity {
            id: admin.id,
            clearance: admin.clearance,
        })
    }
}
