//! User resource route handlers.
//!
//! Each handler is one straight-line flow: validate the path identifier
//! and/or decode the body, make a single gateway call, map the outcome to a
//! status code and JSON body. Handlers hold no state across requests.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use roster_core::UserId;

use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::models::{User, UserDraft, UserPatch};
use crate::state::AppState;

/// Response body for a successful create.
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    /// Raw store acknowledgment for the insert.
    pub res: InsertAck,
}

/// Store acknowledgment carrying the generated identifier.
#[derive(Debug, Serialize)]
pub struct InsertAck {
    pub inserted_id: UserId,
}

/// Confirmation body for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /users` - create a user from the request body.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let Json(draft) = payload.map_err(|_| AppError::InvalidRequest)?;

    let id = state
        .store()
        .insert(draft)
        .await
        .map_err(|e| AppError::store("Failed to create user", e))?;

    tracing::info!(user_id = %id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            res: InsertAck { inserted_id: id },
        }),
    ))
}

/// `GET /users` - list every user.
///
/// An empty collection is a 200 with an empty array, never a 404.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state
        .store()
        .find_all()
        .await
        .map_err(|e| AppError::store("Failed to fetch users", e))?;

    Ok(Json(users))
}

/// `GET /users/{id}` - fetch one user by identifier.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = UserId::parse(&id)?;

    match state.store().find_by_id(id).await {
        Ok(user) => Ok(Json(user)),
        Err(StoreError::NotFound) => Err(AppError::NotFound),
        Err(e) => Err(AppError::store("Failed to fetch user", e)),
    }
}

/// `PUT /users/{id}` - overwrite the fields present in the body.
///
/// Succeeds even when the identifier matches no document; the gateway does
/// not distinguish a no-op update from a real one.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = UserId::parse(&id)?;
    let Json(patch) = payload.map_err(|_| AppError::InvalidRequest)?;

    state
        .store()
        .update_by_id(id, patch)
        .await
        .map_err(|e| AppError::store("Failed to update user", e))?;

    Ok(Json(MessageResponse {
        message: "User updated successfully".to_string(),
    }))
}

/// `DELETE /users/{id}` - delete one user by identifier.
///
/// Idempotent from the client's view; a second delete of the same id also
/// returns 200.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = UserId::parse(&id)?;

    state
        .store()
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::store("Failed to delete user", e))?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
