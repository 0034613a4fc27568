//! REST API handlers

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use serde_json::{Value, json};
use shared::{GenerateBody, GeneratedVariants, ProcessId, process_debug, process_info};

use crate::error::ApiError;
use crate::traits::CopyService;
use crate::webserver_impl::WebServer;

/// Generate copy endpoint - POST /api/generate
///
/// Responds with `{"A": .., "B": ..}` on success. A missing or blank prompt is
/// a 400 and never reaches the provider; generation failures are a 500 with
/// the error message.
pub async fn generate_handler<C>(
    State(webserver): State<WebServer<C>>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GeneratedVariants>, ApiError>
where
    C: CopyService + 'static,
{
    let Json(body) = body?;
    let request = body.into_request().ok_or_else(|| ApiError::bad_request("prompt required"))?;

    process_info!(
        ProcessId::current(),
        "📨 POST /api/generate ({}, {}, {})",
        request.campaign_type,
        request.tone,
        request.persona
    );

    let variants = webserver.copy_service().generate(request).await?;

    process_debug!(ProcessId::current(), "✅ Variants returned");
    Ok(Json(variants))
}

/// Health check - GET /health
pub async fn health_check<C>(State(webserver): State<WebServer<C>>) -> Json<Value>
where
    C: CopyService + 'static,
{
    let state = webserver.state();
    Json(json!({
        "status": "healthy",
        "model": state.model,
        "uptime_seconds": state.get_uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
