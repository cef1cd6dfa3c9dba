//! Admin session gate: login and password rotation
//!
//! Passwords are compared against an Argon2 hash. Hashing runs on the
//! blocking pool so it doesn't stall request workers.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use leasedesk_core::{ChangePasswordRequest, Envelope, LoginRequest};

use crate::auth::{hash_password, verify_password};
use crate::db::AdminRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;

/// POST /api/admin/login
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let password = req.validate()?;

    let creds = AdminRepo::new(&state.pool)
        .credentials()
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: "admin account not found".into(),
        })?;

    if !verify(password, creds.password).await? {
        tracing::warn!("admin login rejected");
        return Err(ApiError::Unauthorized {
            message: "Password does not match".into(),
        });
    }

    tracing::info!("admin logged in");
    Ok(Json(Envelope::message("Login successful")))
}

/// POST /api/admin/change-password
async fn change_password(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let change = req.validate()?;
    let repo = AdminRepo::new(&state.pool);

    let incorrect = || ApiError::Unauthorized {
        message: "Current password is incorrect".into(),
    };

    let creds = repo.credentials().await?.ok_or_else(incorrect)?;
    if !verify(change.current, creds.password).await? {
        tracing::warn!("admin password change rejected");
        return Err(incorrect());
    }

    let hash = tokio::task::spawn_blocking(move || hash_password(&change.new))
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("password hashing task failed: {}", e),
        })??;
    repo.set_password_hash(creds.id, &hash).await?;

    tracing::info!("admin password changed");
    Ok(Json(Envelope::message("Password changed successfully")))
}

async fn verify(password: String, stored: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("password verification task failed: {}", e),
        })
}

/// Admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/change-password", post(change_password))
}
