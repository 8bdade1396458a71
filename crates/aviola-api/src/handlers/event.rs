//! Public event browsing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use aviola_core::error::AppError;
use aviola_entity::event::EventKind;

use crate::dto::request::EventListParams;
use crate::dto::response::{ApiResponse, EventDetailResponse};
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<EventListParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind = params
        .kind
        .as_deref()
        .map(str::parse::<EventKind>)
        .transpose()?;

    let page = state
        .events
        .list_active(
            &pagination.into_page_request(),
            kind,
            params.search.as_deref(),
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventDetailResponse>>, ApiError> {
    let event = state
        .events
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    let ticket_categories = state.inventory.list_for_event(event.id).await?;

    Ok(Json(ApiResponse::ok(EventDetailResponse {
        event,
        ticket_categories,
    })))
}
