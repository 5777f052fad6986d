use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use market_core::serde::to_rfc3339_ms;

use crate::auth;
use crate::domain::repository::{CustomerRepository, NewCustomer};
use crate::domain::types::Customer;
use crate::error::ApiError;

/// Customer account as exposed over the API. The hash and any pending
/// verification code stay server-side.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAccount {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerAccount {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            email_verified: customer.email_verified,
            phone_verified: customer.phone_verified,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

pub struct RegisterCustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

pub struct RegisterCustomerUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> RegisterCustomerUseCase<R> {
    pub async fn execute(
        &self,
        input: RegisterCustomerInput,
    ) -> Result<CustomerAccount, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }
        if input.password.is_empty() {
            return Err(ApiError::Validation("password is required"));
        }

        let customer = self
            .customers
            .insert(NewCustomer {
                name: input.name,
                email: input.email,
                phone: input.phone,
                password_hash: auth::hash_password(&input.password)?,
            })
            .await?;
        Ok(customer.into())
    }
}

/// Storefront login is keyed by display name. Names are not unique; the
/// first matching account wins.
pub struct LoginCustomerUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> LoginCustomerUseCase<R> {
    pub async fn execute(&self, name: &str, password: &str) -> Result<CustomerAccount, ApiError> {
        let customer = self
            .customers
            .find_by_name(name)
            .await?
            .ok_or(ApiError::Unauthorized("invalid name or password"))?;

        if !auth::verify_password(password, &customer.password_hash)? {
            return Err(ApiError::Unauthorized("invalid name or password"));
        }
        Ok(customer.into())
    }
}

pub struct ListCustomersUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> ListCustomersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<CustomerAccount>, ApiError> {
        let customers = self.customers.list().await?;
        Ok(customers.into_iter().map(Into::into).collect())
    }
}

pub struct GetCustomerUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> GetCustomerUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<CustomerAccount, ApiError> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("user"))?;
        Ok(customer.into())
    }
}

pub struct UpdateCustomerInput {
    pub name: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct UpdateCustomerUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> UpdateCustomerUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateCustomerInput,
    ) -> Result<CustomerAccount, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }

        let existing = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        if let Some(new_password) = &input.new_password {
            if new_password.is_empty() {
                return Err(ApiError::Validation("new password cannot be empty"));
            }
            let current = input
                .current_password
                .as_deref()
                .ok_or(ApiError::Validation("current password is required"))?;
            if !auth::verify_password(current, &existing.password_hash)? {
                return Err(ApiError::Unauthorized("current password is incorrect"));
            }
            self.customers
                .set_password_hash(id, &auth::hash_password(new_password)?)
                .await?;
        }

        let customer = self
            .customers
            .update_name(id, &input.name)
            .await?
            .ok_or(ApiError::NotFound("user"))?;
        Ok(customer.into())
    }
}

pub struct DeleteCustomerUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> DeleteCustomerUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.customers.delete(id).await? {
            return Err(ApiError::NotFound("user"));
        }
        Ok(())
    }
}
