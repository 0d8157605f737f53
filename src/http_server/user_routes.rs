//! User HTTP Routes
//!
//! CRUD endpoints over the [`UserStore`]. Writes are validated here,
//! before the store is touched. Store calls block on file I/O, so they
//! run on the blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::schema::{validate, ValidationError};
use crate::storage::{StoreError, StoreResult, User, UserStore};

/// Message returned for unknown ids
pub const USER_NOT_FOUND: &str = "User not found";

/// Message returned for storage faults; details stay in the log
pub const INTERNAL_STORAGE_ERROR: &str = "Internal storage error";

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// An error on its way to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_STORAGE_ERROR)
    }

    #[cfg(test)]
    fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    fn message(&self) -> &str {
        &self.message
    }
}

/// Status comes from [`StoreError::status_code`]. Server faults are logged
/// and reported without detail; 404s carry a fixed message.
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %e, "storage failure");
            return Self::new(status, INTERNAL_STORAGE_ERROR);
        }

        match e {
            StoreError::NotFound(_) => Self::new(status, USER_NOT_FOUND),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        StoreError::from(e).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(store: Arc<UserStore>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(store)
}

// ==================
// Helper Functions
// ==================

/// Runs a store operation on the blocking pool.
async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            error!(error = %e, "store task failed");
            Err(ApiError::internal())
        }
    }
}

// ==================
// Handlers
// ==================

async fn list_users_handler(
    State(store): State<Arc<UserStore>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = run_blocking(move || Ok(store.list_all())).await?;
    Ok(Json(users))
}

async fn create_user_handler(
    State(store): State<Arc<UserStore>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(body) = payload?;
    let draft = validate(&body)?;

    let user = run_blocking(move || store.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user_handler(
    State(store): State<Arc<UserStore>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = run_blocking(move || store.get_by_id(&id)).await?;
    Ok(Json(user))
}

async fn update_user_handler(
    State(store): State<Arc<UserStore>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(body) = payload?;
    let draft = validate(&body)?;

    let user = run_blocking(move || store.update_by_id(&id, draft)).await?;
    Ok(Json(user))
}

async fn delete_user_handler(
    State(store): State<Arc<UserStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_blocking(move || store.delete_by_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
