use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use market_core::serde::to_rfc3339_ms;

use crate::auth::{self, AdminIdentity};
use crate::domain::repository::{
    AdminUserPatch, AdminUserRepository, CascadeReport, NewAdminUser,
};
use crate::domain::types::{AdminUser, ClearanceLevel};
use crate::error::ApiError;

/// Admin account as exposed over the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccount {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub clearance_level: ClearanceLevel,
    pub created_by: Option<Uuid>,
    pub is_active: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<AdminUser> for AdminAccount {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            name: admin.name,
            email: admin.email,
            clearance_level: admin.clearance,
            created_by: admin.created_by,
            is_active: admin.is_active,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub token: String,
    pub admin: AdminAccount,
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
    pub jwt_secret: String,
}

impl<R: AdminUserRepository> LoginAdminUseCase<R> {
    pub async fn execute(&self, username: &str, password: &str) -> Result<AdminSession, ApiError> {
        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or(ApiError::Unauthorized("invalid username or password"))?;

        if !auth::verify_password(password, &admin.password_hash)? {
            return Err(ApiError::Unauthorized("invalid username or password"));
        }
        if !admin.is_active {
            return Err(ApiError::Forbidden("account is deactivated"));
        }

        let token = auth::issue_admin_token(admin.id, admin.clearance, &self.jwt_secret)?;
        Ok(AdminSession {
            token,
            admin: admin.into(),
        })
    }
}

// ── Account management (super admin only) ─────────────────────────────────────

pub struct CreateAdminInput {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub clearance: ClearanceLevel,
}

pub struct CreateAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> CreateAdminUseCase<R> {
    pub async fn execute(
        &self,
        acting: AdminIdentity,
        input: CreateAdminInput,
    ) -> Result<AdminAccount, ApiError> {
        acting.require_super()?;

        if input.username.trim().is_empty() {
            return Err(ApiError::Validation("username is required"));
        }
        if input.password.len() < 6 {
            return Err(ApiError::Validation(
                "password must be at least 6 characters",
            ));
        }

        if self.admins.find_by_username(&input.username).await?.is_some() {
            return Err(ApiError::Conflict("username already exists".into()));
        }
        if self.admins.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict("email already exists".into()));
        }

        let admin = self
            .admins
            .insert(NewAdminUser {
                username: input.username,
                name: input.name,
                email: input.email,
                password_hash: auth::hash_password(&input.password)?,
                clearance: input.clearance,
                created_by: Some(acting.id),
            })
            .await?;
        Ok(admin.into())
    }
}

pub struct ListAdminsUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> ListAdminsUseCase<R> {
    pub async fn execute(&self, acting: AdminIdentity) -> Result<Vec<AdminAccount>, ApiError> {
        acting.require_super()?;
        let admins = self.admins.list_active().await?;
        Ok(admins.into_iter().map(Into::into).collect())
    }
}

pub struct GetAdminProfileUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> GetAdminProfileUseCase<R> {
    pub async fn execute(&self, acting: AdminIdentity) -> Result<AdminAccount, ApiError> {
        let admin = self
            .admins
            .find_by_id(acting.id)
            .await?
            .ok_or(ApiError::NotFound("admin"))?;
        Ok(admin.into())
    }
}

pub struct UpdateAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> UpdateAdminUseCase<R> {
    /// Admins may edit their own name and email; clearance and activation
    /// changes require a super admin.
    pub async fn execute(
        &self,
        acting: AdminIdentity,
        id: Uuid,
        patch: AdminUserPatch,
    ) -> Result<AdminAccount, ApiError> {
        if acting.id != id {
            acting.require_super()?;
        }
        if (patch.clearance.is_some() || patch.is_active.is_some()) && !acting.is_super() {
            return Err(ApiError::Forbidden("super admin access required"));
        }

        if let Some(email) = &patch.email {
            if let Some(other) = self.admins.find_by_email(email).await? {
                if other.id != id {
                    return Err(ApiError::Conflict("email already exists".into()));
                }
            }
        }

        let admin = self
            .admins
            .apply_patch(id, patch)
            .await?
            .ok_or(ApiError::NotFound("admin"))?;
        Ok(admin.into())
    }
}

pub struct DeactivateAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> DeactivateAdminUseCase<R> {
    pub async fn execute(&self, acting: AdminIdentity, id: Uuid) -> Result<(), ApiError> {
        acting.require_super()?;
        if acting.id == id {
            return Err(ApiError::Validation(
                "you cannot deactivate your own account",
            ));
        }
        if !self.admins.deactivate(id).await? {
            return Err(ApiError::NotFound("admin"));
        }
        Ok(())
    }
}

pub struct DeleteAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> DeleteAdminUseCase<R> {
    /// Removes the admin and everything they created. The cascade is
    /// best-effort; the report says how much of it went through.
    pub async fn execute(
        &self,
        acting: AdminIdentity,
        id: Uuid,
    ) -> Result<CascadeReport, ApiError> {
        acting.require_super()?;
        if acting.id == id {
            return Err(ApiError::Validation("you cannot delete your own account"));
        }
        self.admins
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("admin"))?;
        self.admins.delete_with_owned(id).await
    }
}

// ── Bootstrap ─────────────────────────────────────────────────────────────────

/// Seed the first super admin at startup when none exists yet.
pub struct BootstrapSuperAdminUseCase<R: AdminUserRepository> {
    pub admins: R,
}

impl<R: AdminUserRepository> BootstrapSuperAdminUseCase<R> {
    pub async fn execute(&self, username: &str, password: &str) -> Result<(), ApiError> {
        if self.admins.any_super_admin().await? {
            return Ok(());
        }

        let admin = self
            .admins
            .insert(NewAdminUser {
                username: username.to_owned(),
                name: "Super Admin".to_owned(),
                email: format!("{username}@local"),
                password_hash: auth::hash_password(password)?,
                clearance: ClearanceLevel::SuperAdmin,
                created_by: None,
            })
            .await?;
        tracing::info!(admin_id = %admin.id, username, "bootstrapped super admin");
        Ok(())
    }
}
