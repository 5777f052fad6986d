use uuid::Uuid;

use crate::auth::AdminIdentity;
use crate::domain::repository::CatalogRepository;
use crate::domain::types::Owned;
use crate::error::ApiError;

/// List rows, optionally scoped to one creator via `?adminId=`.
pub struct ListEntitiesUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> ListEntitiesUseCase<R> {
    pub async fn execute(&self, created_by: Option<Uuid>) -> Result<Vec<R::Entity>, ApiError> {
        self.repo.list(created_by).await
    }
}

pub struct GetEntityUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> GetEntityUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<R::Entity, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(R::KIND))
    }
}

/// Create a row owned by the acting admin. The owner always comes from the
/// validated token, never from the request body.
pub struct CreateEntityUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> CreateEntityUseCase<R> {
    pub async fn execute(
        &self,
        admin: AdminIdentity,
        new: R::NewEntity,
    ) -> Result<R::Entity, ApiError> {
        self.repo.insert(new, admin.id).await
    }
}

pub struct UpdateEntityUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> UpdateEntityUseCase<R> {
    pub async fn execute(
        &self,
        admin: AdminIdentity,
        id: Uuid,
        patch: R::Patch,
    ) -> Result<R::Entity, ApiError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(R::KIND))?;

        if !admin.can_modify(existing.created_by()) {
            return Err(ApiError::Forbidden("you can only modify records you created"));
        }

        self.repo
            .apply_patch(id, patch)
            .await?
            .ok_or(ApiError::NotFound(R::KIND))
    }
}

/// Delete with the ownership rule plus a referential-integrity check: rows
/// still referenced elsewhere are refused, not cascaded.
pub struct DeleteEntityUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> DeleteEntityUseCase<R> {
    pub async fn execute(&self, admin: AdminIdentity, id: Uuid) -> Result<(), ApiError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(R::KIND))?;

        if !admin.can_modify(existing.created_by()) {
            return Err(ApiError::Forbidden("you can only delete records you created"));
        }

        let dependents = self.repo.dependent_count(id).await?;
        if dependents > 0 {
            return Err(ApiError::Conflict(format!(
                "cannot delete {}: {dependents} record(s) still reference it",
                R::KIND
            )));
        }

        self.repo.delete(id).await
    }
}
