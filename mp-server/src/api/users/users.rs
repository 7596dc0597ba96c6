//! User REST API handlers
//!
//! CRUD over user profiles plus the match-candidate endpoint. Email
//! uniqueness is checked up front for the friendly 400, and the store's
//! unique index backs the check against racing writers.

use crate::{
    ApiError, ApiResult, AppState, CreateUserRequest, DeleteResponse, ListUsersQuery,
    UpdateUserRequest, UserDto,
};

use mp_core::{ErrorLocation, MatchCriteria, NewUser, UserPatch, shares_interest};
use mp_db::UserRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};

// =============================================================================
// Handlers
// =============================================================================

/// POST /users/
///
/// Create a new user profile
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    let new_user = NewUser::from(req);
    new_user.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    // Check if email already exists
    if repo.find_by_email(&new_user.email).await?.is_some() {
        return Err(ApiError::DuplicateEmail {
            message: format!("Email {} already registered", new_user.email),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let user = repo.insert(&new_user).await?;

    log::info!("Created user {} ({}) via REST API", user.id, user.email);

    Ok(Json(user.into()))
}

/// GET /users/?skip=&limit=
///
/// List users in id order, paginated
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.find_page(query.skip, query.limit).await?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// GET /users/{id}
///
/// Get a single user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserDto>> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
        message: format!("User {} not found", id),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(Json(user.into()))
}

/// PUT /users/{id}
///
/// Partially update a user; omitted fields keep their stored values
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    let patch = UserPatch::from(req);
    patch.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let current = repo.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
        message: format!("User {} not found", id),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Check if new email already exists; keeping one's own email is fine
    if let Some(email) = &patch.email {
        if email != &current.email && repo.find_by_email(email).await?.is_some() {
            return Err(ApiError::DuplicateEmail {
                message: format!("Email {} already registered", email),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    if patch.is_empty() {
        // No fields supplied, return current state
        return Ok(Json(current.into()));
    }

    repo.update_fields(id, &patch).await?;

    let updated = repo.find_by_id(id).await?.ok_or_else(|| ApiError::Internal {
        message: format!("User {} vanished during update", id),
        location: ErrorLocation::from(Location::caller()),
    })?;

    log::info!("Updated user {} via REST API", id);

    Ok(Json(updated.into()))
}

/// DELETE /users/{id}
///
/// Delete a user; returns a confirmation message, not the entity
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    let repo = UserRepository::new(state.pool.clone());

    if !repo.delete(id).await? {
        return Err(ApiError::NotFound {
            message: format!("User {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::info!("Deleted user {} via REST API", id);

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
    }))
}

/// GET /users/{id}/matches
///
/// Match candidates for a user: opposite declared gender, same city, age
/// within the inclusive window, at least one shared interest. Empty is a
/// valid result.
pub async fn find_matches(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let repo = UserRepository::new(state.pool.clone());
    let subject = repo.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
        message: format!("User {} not found", id),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let criteria = MatchCriteria::for_subject(&subject);
    let candidates = repo.find_match_candidates(&criteria).await?;

    let matches: Vec<UserDto> = candidates
        .into_iter()
        .filter(|candidate| shares_interest(&subject.interests, &candidate.interests))
        .map(UserDto::from)
        .collect();

    Ok(Json(matches))
}
