//! Handlers for `/admin/users` -- user administration (admin role only).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::roles::is_valid_role;
use fable_core::types::DbId;
use fable_core::validation::validate_username;
use fable_db::models::user::{UpdateUser, UserResponse};
use fable_db::repositories::{clamp_limit, clamp_offset, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    /// Case-insensitive username/email substring filter.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct AdminCreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPassword {
    pub password: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(
        &state.pool,
        params.q.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users
///
/// Create a user with an explicit role (admins can mint other admins).
pub async fn create_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<AdminCreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_username(&input.username)
        .map_err(|_| AppError::Core(CoreError::Validation("Invalid username".into())))?;
    if !is_valid_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {}",
            input.role
        ))));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = fable_db::models::user::CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role: input.role,
    };
    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, role = %user.role, "Admin created user");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(role) = input.role.as_deref() {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate the account and revoke its sessions.
pub async fn deactivate_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = UserRepo::deactivate(&state.pool, id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Replace the user's password and revoke all existing sessions.
pub async fn reset_password(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPassword>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let found = UserRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
