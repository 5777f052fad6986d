use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use market_api_schema::customers;

use crate::domain::repository::{CustomerRepository, NewCustomer};
use crate::domain::types::Customer;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbCustomerRepository {
    pub db: DatabaseConnection,
}

fn customer_from_model(model: customers::Model) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        email_verified: model.email_verified,
        phone_verified: model.phone_verified,
        verification_code: model.verification_code,
        code_expires: model.code_expires,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl DbCustomerRepository {
    async fn load(&self, id: Uuid) -> Result<Option<customers::Model>, ApiError> {
        Ok(customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find customer")?)
    }
}

impl CustomerRepository for DbCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, ApiError> {
        Ok(self.load(id).await?.map(customer_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError> {
        let model = customers::Entity::find()
            .filter(customers::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .context("find customer by email")?;
        Ok(model.map(customer_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError> {
        let model = customers::Entity::find()
            .filter(customers::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find customer by name")?;
        Ok(model.map(customer_from_model))
    }

    async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        let models = customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list customers")?;
        Ok(models.into_iter().map(customer_from_model).collect())
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, ApiError> {
        let now = Utc::now();
        let model = customers::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            email: Set(new.email.map(|e| e.to_lowercase())),
            phone: Set(new.phone),
            password_hash: Set(new.password_hash),
            email_verified: Set(false),
            phone_verified: Set(false),
            verification_code: Set(None),
            code_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("an account with that email or phone already exists".into())
            }
            _ => ApiError::Internal(anyhow::Error::new(e).context("insert customer")),
        })?;
        Ok(customer_from_model(model))
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Customer>, ApiError> {
        let Some(existing) = self.load(id).await? else {
            return Ok(None);
        };
        let mut active: customers::ActiveModel = existing.into();
        active.name = Set(name.to_owned());
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .context("update customer name")?;
        Ok(Some(customer_from_model(model)))
    }

    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<Customer>, ApiError> {
        let Some(existing) = self.load(id).await? else {
            return Ok(None);
        };
        let mut active: customers::ActiveModel = existing.into();
        active.email = Set(Some(email.to_lowercase()));
        // New address needs its own verification pass.
        active.email_verified = Set(false);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .context("update customer email")?;
        Ok(Some(customer_from_model(model)))
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), ApiError> {
        customers::ActiveModel {
            id: Set(id),
            password_hash: Set(hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set customer password")?;
        Ok(())
    }

    async fn upsert_pending(
        &self,
        email: &str,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<Customer, ApiError> {
        let email = email.to_lowercase();
        if let Some(existing) = customers::Entity::find()
            .filter(customers::Column::Email.eq(email.clone()))
            .one(&self.db)
            .await
            .context("find customer for code upsert")?
        {
            let mut active: customers::ActiveModel = existing.into();
            active.verification_code = Set(Some(code.to_owned()));
            active.code_expires = Set(Some(expires));
            active.email_verified = Set(false);
            active.updated_at = Set(Utc::now());
            let model = active
                .update(&self.db)
                .await
                .context("update pending verification")?;
            return Ok(customer_from_model(model));
        }

        // Skeleton account: name and password arrive at registration.
        let now = Utc::now();
        let model = customers::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(String::new()),
            email: Set(Some(email)),
            phone: Set(None),
            password_hash: Set(String::new()),
            email_verified: Set(false),
            phone_verified: Set(false),
            verification_code: Set(Some(code.to_owned())),
            code_expires: Set(Some(expires)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert pending verification")?;
        Ok(customer_from_model(model))
    }

    async fn set_verification_code(
        &self,
        id: Uuid,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        customers::ActiveModel {
            id: Set(id),
            verification_code: Set(Some(code.to_owned())),
            code_expires: Set(Some(expires)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set verification code")?;
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<(), ApiError> {
        customers::ActiveModel {
            id: Set(id),
            email_verified: Set(true),
            verification_code: Set(None),
            code_expires: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark email verified")?;
        Ok(())
    }

    async fn clear_verification_code(&self, id: Uuid) -> Result<(), ApiError> {
        customers::ActiveModel {
            id: Set(id),
            verification_code: Set(None),
            code_expires: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("clear verification code")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = customers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete customer")?;
        Ok(res.rows_affected > 0)
    }
}
