use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::customer::{
    CustomerAccount, DeleteCustomerUseCase, GetCustomerUseCase, ListCustomersUseCase,
    LoginCustomerUseCase, RegisterCustomerInput, RegisterCustomerUseCase, UpdateCustomerInput,
    UpdateCustomerUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    pub name: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Envelope<CustomerAccount>>, ApiError> {
    let account = RegisterCustomerUseCase {
        customers: state.customer_repo(),
    }
    .execute(RegisterCustomerInput {
        name: body.name,
        email: body.email,
        phone: body.phone,
        password: body.password,
    })
    .await?;
    Ok(Envelope::ok("User registered successfully.", account))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Envelope<CustomerAccount>>, ApiError> {
    let account = LoginCustomerUseCase {
        customers: state.customer_repo(),
    }
    .execute(&body.name, &body.password)
    .await?;
    Ok(Envelope::ok("Login successful.", account))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<CustomerAccount>>>, ApiError> {
    let accounts = ListCustomersUseCase {
        customers: state.customer_repo(),
    }
    .execute()
    .await?;
    Ok(Envelope::ok("Users retrieved successfully.", accounts))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<CustomerAccount>>, ApiError> {
    let account = GetCustomerUseCase {
        customers: state.customer_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("User retrieved successfully.", account))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Envelope<CustomerAccount>>, ApiError> {
    let account = UpdateCustomerUseCase {
        customers: state.customer_repo(),
    }
    .execute(
        id,
        UpdateCustomerInput {
            name: body.name,
            current_password: body.current_password,
            new_password: body.new_password,
        },
    )
    .await?;
    Ok(Envelope::ok("User updated successfully.", account))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    DeleteCustomerUseCase {
        customers: state.customer_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok_empty("User deleted successfully."))
}
