use super::dto::{
    CreatePaymentRequest, ListPaymentsQuery, PagedResponse, PaymentResponse, UpdateStatusRequest,
};
use super::error::ApiError;
use crate::application::service::PaymentService;
use crate::error::PaymentError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the payment router with all routes mounted under `/api/payments`.
pub fn router(service: Arc<PaymentService>) -> Router {
    Router::new()
        .route("/api/payments", post(create_payment).get(list_payments))
        .route("/api/payments/{id}", get(get_payment))
        .route("/api/payments/{id}/status", patch(update_payment_status))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn create_payment(
    State(service): State<Arc<PaymentService>>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let payment = service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(&payment))))
}

async fn get_payment(
    State(service): State<Arc<PaymentService>>,
    Path(id): Path<i64>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = service
        .find_by_id(id)
        .await?
        .ok_or(PaymentError::NotFound(id))?;
    Ok(Json(PaymentResponse::from(&payment)))
}

async fn list_payments(
    State(service): State<Arc<PaymentService>>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<PagedResponse<PaymentResponse>>, ApiError> {
    let page = service
        .find_all(query.filter(), query.page, query.size)
        .await?;
    Ok(Json(page.into()))
}

async fn update_payment_status(
    State(service): State<Arc<PaymentService>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = service.update_status(id, request.status).await?;
    Ok(Json(PaymentResponse::from(&payment)))
}
