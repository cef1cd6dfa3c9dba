//! Inquiry endpoints
//!
//! All four verbs share `/api/inquiries`; ids and filters travel in the
//! query string (GET, DELETE) or the JSON body (PATCH).

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use leasedesk_core::{
    parse_id, CreateInquiryRequest, Envelope, Inquiry, InquiryChange, StatusFilter,
    UpdateInquiryRequest,
};
use serde::Deserialize;

use crate::db::InquiryRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams};
use crate::http::server::AppState;

/// GET query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// DELETE query parameters
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// GET /api/inquiries - list inquiries, newest first
async fn list_inquiries(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Envelope<Vec<Inquiry>>>, ApiError> {
    let Some(filter) = StatusFilter::matching(params.status.as_deref()) else {
        // Stored statuses are constrained to the known set
        tracing::debug!(status = ?params.status, "unknown status filter matches nothing");
        return Ok(Json(Envelope::data(Vec::new())));
    };
    let inquiries = InquiryRepo::new(&state.pool).list(filter).await?;

    tracing::debug!(filter = filter.as_str(), count = inquiries.len(), "listed inquiries");
    Ok(Json(Envelope::data(inquiries)))
}

/// POST /api/inquiries - record a new submission as pending
async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateInquiryRequest>,
) -> Result<(StatusCode, Json<Envelope<()>>), ApiError> {
    let inquiry = req.validate()?;
    let created_at = state.clock.now();
    let id = InquiryRepo::new(&state.pool)
        .create(&inquiry, &created_at)
        .await?;

    tracing::info!(inquiry_id = id, %created_at, "inquiry created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::message("Inquiry created successfully")),
    ))
}

/// PATCH /api/inquiries - change status, memo, or both
async fn update_inquiry(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UpdateInquiryRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let (id, change) = req.validate()?;
    InquiryRepo::new(&state.pool).update(id, &change).await?;

    match &change {
        InquiryChange::Status(status) => {
            tracing::info!(inquiry_id = id, %status, "inquiry status updated")
        }
        InquiryChange::Memo(memo) => {
            tracing::info!(inquiry_id = id, cleared = memo.is_none(), "inquiry memo updated")
        }
        InquiryChange::StatusAndMemo { status, memo } => tracing::info!(
            inquiry_id = id,
            %status,
            cleared = memo.is_none(),
            "inquiry status and memo updated"
        ),
    }

    Ok(Json(Envelope::message("Updated successfully")))
}

/// DELETE /api/inquiries?id= - remove an inquiry (idempotent)
async fn delete_inquiry(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<DeleteParams>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let removed = InquiryRepo::new(&state.pool).delete(id).await?;

    tracing::info!(inquiry_id = id, removed, "inquiry deleted");
    Ok(Json(Envelope::message("Inquiry deleted successfully")))
}

/// Inquiry routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/inquiries",
        get(list_inquiries)
            .post(create_inquiry)
            .patch(update_inquiry)
            .delete(delete_inquiry),
    )
}
