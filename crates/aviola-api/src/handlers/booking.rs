//! Booking lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use aviola_core::error::AppError;
use aviola_service::booking::TicketSelection;

use crate::dto::request::{CreateBookingRequest, PaymentRequest};
use crate::dto::response::{ApiResponse, PaymentResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let event = state
        .events
        .get_event(req.event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    if !event.is_bookable() {
        return Err(AppError::conflict("Event is not open for booking").into());
    }

    let items: Vec<TicketSelection> = req
        .tickets
        .iter()
        .map(|t| TicketSelection {
            category_id: t.category_id,
            quantity: t.quantity,
        })
        .collect();

    let booking = state
        .engine
        .place_booking(auth.user_id, event.id, &items)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": booking })),
    ))
}

/// GET /api/bookings/my-bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bookings = state.engine.list_bookings_for_user(auth.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": bookings })))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let booking = state.engine.get_booking(id, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": booking })))
}

/// POST /api/bookings/{id}/payment
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, ApiError> {
    let booking = state
        .engine
        .confirm_payment(id, auth.user_id, &req.payment_method)
        .await?;

    let payment_id = booking
        .payment_reference
        .clone()
        .ok_or_else(|| AppError::internal("Confirmed booking has no payment reference"))?;

    Ok(Json(ApiResponse::ok(PaymentResponse {
        payment_id,
        booking,
    })))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let booking = state.engine.cancel_booking(id, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": booking })))
}
