//! Administrative event management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use aviola_core::error::AppError;
use aviola_entity::category::CreateTicketCategory;
use aviola_entity::event::{CreateEvent, EventKind};

use crate::dto::request::{CreateEventRequest, UpdatePriceRequest};
use crate::dto::response::{ApiResponse, EventDetailResponse, PriceUpdateResponse};
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// POST /api/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EventDetailResponse>>), ApiError> {
    if req.title.trim().is_empty() {
        return Err(AppError::validation("Event title must not be empty").into());
    }
    let kind: EventKind = req.kind.parse()?;
    for tier in &req.ticket_categories {
        if tier.total_seats <= 0 {
            return Err(AppError::validation(format!(
                "Ticket category '{}' must have a positive seat count",
                tier.name
            ))
            .into());
        }
        if tier.unit_price_cents < 0 {
            return Err(AppError::validation(format!(
                "Ticket category '{}' must not have a negative price",
                tier.name
            ))
            .into());
        }
    }

    let event = state
        .events
        .create_event(&CreateEvent {
            title: req.title,
            description: req.description,
            kind,
            venue_name: req.venue_name,
            venue_address: req.venue_address,
            venue_city: req.venue_city,
            venue_capacity: req.venue_capacity,
            starts_at: req.starts_at,
            duration_minutes: req.duration_minutes,
            organizer_name: req.organizer_name,
            organizer_contact: req.organizer_contact,
            created_by: admin.user_id,
        })
        .await?;

    let mut ticket_categories = Vec::with_capacity(req.ticket_categories.len());
    for tier in req.ticket_categories {
        let category = state
            .inventory
            .create_category(&CreateTicketCategory {
                event_id: event.id,
                name: tier.name,
                description: tier.description,
                unit_price_cents: tier.unit_price_cents,
                total_seats: tier.total_seats,
            })
            .await?;
        ticket_categories.push(category);
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(EventDetailResponse {
            event,
            ticket_categories,
        })),
    ))
}

/// PUT /api/admin/categories/{id}/price
pub async fn update_price(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<Json<ApiResponse<PriceUpdateResponse>>, ApiError> {
    if req.unit_price_cents < 0 {
        return Err(AppError::validation("Price must not be negative").into());
    }

    let updated = state
        .inventory
        .update_price(id, req.unit_price_cents)
        .await?;
    if !updated {
        return Err(AppError::not_found("Ticket category not found").into());
    }

    Ok(Json(ApiResponse::ok(PriceUpdateResponse {
        category_id: id,
        unit_price_cents: req.unit_price_cents,
    })))
}
