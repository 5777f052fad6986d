use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use market_api_schema::{
    admin_users, brands, categories, coupons, posters, products, sub_categories, variant_types,
    variants,
};

use crate::domain::repository::{
    AdminUserPatch, AdminUserRepository, CascadeReport, NewAdminUser,
};
use crate::domain::types::{AdminUser, ClearanceLevel};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbAdminUserRepository {
    pub db: DatabaseConnection,
}

fn admin_from_model(model: admin_users::Model) -> Result<AdminUser, ApiError> {
    let clearance = ClearanceLevel::parse(&model.clearance_level)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad clearance_level in row")))?;
    Ok(AdminUser {
        id: model.id,
        username: model.username,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        clearance,
        created_by: model.created_by,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl AdminUserRepository for DbAdminUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, ApiError> {
        let model = admin_users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        model.map(admin_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, ApiError> {
        let model = admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find admin by username")?;
        model.map(admin_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, ApiError> {
        let model = admin_users::Entity::find()
            .filter(admin_users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find admin by email")?;
        model.map(admin_from_model).transpose()
    }

    async fn list_active(&self) -> Result<Vec<AdminUser>, ApiError> {
        let models = admin_users::Entity::find()
            .filter(admin_users::Column::IsActive.eq(true))
            .order_by_desc(admin_users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list active admins")?;
        models.into_iter().map(admin_from_model).collect()
    }

    async fn insert(&self, new: NewAdminUser) -> Result<AdminUser, ApiError> {
        let now = Utc::now();
        let model = admin_users::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(new.username),
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            clearance_level: Set(new.clearance.as_str().to_owned()),
            created_by: Set(new.created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("username or email already exists".into())
            }
            _ => ApiError::Internal(anyhow::Error::new(e).context("insert admin")),
        })?;
        admin_from_model(model)
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: AdminUserPatch,
    ) -> Result<Option<AdminUser>, ApiError> {
        let Some(existing) = admin_users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin for update")?
        else {
            return Ok(None);
        };

        let mut active: admin_users::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(clearance) = patch.clearance {
            active.clearance_level = Set(clearance.as_str().to_owned());
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update admin")?;
        Ok(Some(admin_from_model(model)?))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, ApiError> {
        let Some(existing) = admin_users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin for deactivation")?
        else {
            return Ok(false);
        };

        let mut active: admin_users::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.context("deactivate admin")?;
        Ok(true)
    }

    async fn delete_with_owned(&self, id: Uuid) -> Result<CascadeReport, ApiError> {
        let mut report = CascadeReport::default();

        // Products first: FK cascade takes their images and variant links.
        match products::Entity::delete_many()
            .filter(products::Column::CreatedBy.eq(id))
            .exec(&self.db)
            .await
        {
            Ok(res) => report.products = res.rows_affected,
            Err(e) => tracing::warn!(error = %e, admin_id = %id, "cascade: products failed"),
        }

        macro_rules! sweep {
            ($entity:ident, $field:ident) => {
                match $entity::Entity::delete_many()
                    .filter($entity::Column::CreatedBy.eq(id))
                    .exec(&self.db)
                    .await
                {
                    Ok(res) => report.$field = res.rows_affected,
                    Err(e) => {
                        tracing::warn!(error = %e, admin_id = %id, concat!("cascade: ", stringify!($field), " failed"))
                    }
                }
            };
        }

        sweep!(variants, variants);
        sweep!(variant_types, variant_types);
        sweep!(brands, brands);
        sweep!(sub_categories, sub_categories);
        sweep!(categories, categories);
        sweep!(coupons, coupons);
        sweep!(posters, posters);

        admin_users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete admin row")?;

        Ok(report)
    }

    async fn any_super_admin(&self) -> Result<bool, ApiError> {
        let count = admin_users::Entity::find()
            .filter(
                admin_users::Column::ClearanceLevel.eq(ClearanceLevel::SuperAdmin.as_str()),
            )
            .count(&self.db)
            .await
            .context("count super admins")?;
        Ok(count > 0)
    }
}
