//! Profile and address-book route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use velvet_loom_core::AddressId;

use crate::db::{AddressRepository, UserRepository};
use crate::db::addresses::AddressInput;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Address, User};
use crate::state::AppState;

/// Body for a profile update. Absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Body for creating or replacing an address.
#[derive(Debug, Deserialize)]
pub struct AddressBody {
    pub label: Option<String>,
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressBody {
    fn validate(&self) -> Result<AddressInput> {
        for (field, value) in [
            ("recipient", &self.recipient),
            ("phone", &self.phone),
            ("line1", &self.line1),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} must not be empty")));
            }
        }
        Ok(AddressInput {
            label: self.label.clone(),
            recipient: self.recipient.clone(),
            phone: self.phone.clone(),
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        })
    }
}

/// GET /me
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;
    Ok(Json(user))
}

/// PATCH /me
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .update_profile(user.id, body.name.as_deref(), body.phone.as_deref())
        .await?;
    Ok(Json(user))
}

/// GET /me/addresses
pub async fn addresses(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(addresses))
}

/// POST /me/addresses
pub async fn create_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddressBody>,
) -> Result<(StatusCode, Json<Address>)> {
    let input = body.validate()?;
    let address = AddressRepository::new(state.pool())
        .create(user.id, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// PUT /me/addresses/{id}
pub async fn update_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(address_id): Path<AddressId>,
    Json(body): Json<AddressBody>,
) -> Result<Json<Address>> {
    let input = body.validate()?;
    let address = AddressRepository::new(state.pool())
        .update(user.id, address_id, &input)
        .await?;
    Ok(Json(address))
}

/// DELETE /me/addresses/{id}
pub async fn delete_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(address_id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressRepository::new(state.pool())
        .delete(user.id, address_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /me/addresses/{id}/default
pub async fn set_default_address(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(address_id): Path<AddressId>,
) -> Result<Json<Vec<Address>>> {
    let repo = AddressRepository::new(state.pool());
    repo.set_default(user.id, address_id).await?;
    Ok(Json(repo.list(user.id).await?))
}
