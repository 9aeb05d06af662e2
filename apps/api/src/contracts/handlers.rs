//! Axum route handlers for the Contracts API.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::contracts::composer::{compose_contract, ComposedContract, CompositionMetadata};
use crate::contracts::delivery::{now_local, today_contract_date, DeliveryTicket};
use crate::errors::{AppError, ComposeError};
use crate::layout::{DrawStream, OverflowNotice};
use crate::models::contract::{ContractRecord, MESSAGE_LINE_COUNT};
use crate::render::RenderedArtifact;
use crate::state::AppState;

const PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");
const SECTION_COUNT_HEADER: HeaderName = HeaderName::from_static("x-section-count");

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FromMessageRequest {
    pub text: String,
    #[serde(default)]
    pub contract_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub document_id: Uuid,
    pub filename: String,
    pub metadata: CompositionMetadata,
    pub overflows: Vec<OverflowNotice>,
    pub instructions: DrawStream,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/contracts
///
/// Composes the agreement for a JSON contract record and returns the draw
/// instructions with delivery metadata. `contract_date` defaults to today.
pub async fn handle_compose(
    State(state): State<AppState>,
    Json(record): Json<ContractRecord>,
) -> Result<Json<ComposeResponse>, AppError> {
    let record = record.with_default_contract_date(today_contract_date);
    let (composed, record) = compose_blocking(&state, record).await?;
    Ok(Json(compose_response(&state, composed, &record)))
}

/// POST /api/v1/contracts/from-message
///
/// Accepts the line-per-field booking message agents paste into chat:
/// name, address, phone, email, destination, start date, end date,
/// participants, transport, accommodation, price, currency.
pub async fn handle_compose_from_message(
    State(state): State<AppState>,
    Json(request): Json<FromMessageRequest>,
) -> Result<Json<ComposeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let contract_date = request
        .contract_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(today_contract_date);

    let record = ContractRecord::from_message(&request.text, contract_date).map_err(|found| {
        AppError::Validation(format!(
            "message must contain {MESSAGE_LINE_COUNT} non-empty lines, found {found}"
        ))
    })?;

    let (composed, record) = compose_blocking(&state, record).await?;
    Ok(Json(compose_response(&state, composed, &record)))
}

/// POST /api/v1/contracts/render
///
/// Composes and renders in one step, returning the artifact bytes with a
/// suggested download name and the page/section counts as headers.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(record): Json<ContractRecord>,
) -> Result<Response, AppError> {
    let record = record.with_default_contract_date(today_contract_date);

    let engine = state.engine.clone();
    let renderer = state.renderer.clone();
    let (composed, artifact, record) = tokio::task::spawn_blocking(move || {
        let composed = compose_contract(&record, &engine)?;
        let artifact = renderer.render(&composed.stream, engine.geometry())?;
        Ok::<_, AppError>((composed, artifact, record))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    let ticket = DeliveryTicket::new(
        &composed,
        &record.client_name,
        state.renderer.extension(),
        now_local(),
    );
    info!(
        document_id = %ticket.document_id,
        pages = composed.page_count,
        bytes = artifact.bytes.len(),
        "Rendered contract"
    );

    artifact_response(&ticket, artifact)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Runs composition on the blocking pool and hands the record back for naming.
async fn compose_blocking(
    state: &AppState,
    record: ContractRecord,
) -> Result<(ComposedContract, ContractRecord), AppError> {
    let engine = state.engine.clone();
    let composed = tokio::task::spawn_blocking(move || {
        let composed = compose_contract(&record, &engine)?;
        Ok::<_, ComposeError>((composed, record))
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in composition: {e}"))
    })??;
    Ok(composed)
}

fn compose_response(
    state: &AppState,
    composed: ComposedContract,
    record: &ContractRecord,
) -> ComposeResponse {
    let ticket = DeliveryTicket::new(
        &composed,
        &record.client_name,
        state.renderer.extension(),
        now_local(),
    );
    info!(
        document_id = %ticket.document_id,
        pages = composed.page_count,
        overflows = composed.overflows.len(),
        "Composed contract"
    );

    ComposeResponse {
        document_id: ticket.document_id,
        filename: ticket.filename,
        metadata: ticket.metadata,
        overflows: composed.overflows,
        instructions: composed.stream,
    }
}

fn artifact_response(
    ticket: &DeliveryTicket,
    artifact: RenderedArtifact,
) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        ticket.filename
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))?;

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(artifact.media_type)),
        (header::CONTENT_DISPOSITION, disposition),
        (PAGE_COUNT_HEADER, HeaderValue::from(ticket.metadata.page_count)),
        (
            SECTION_COUNT_HEADER,
            HeaderValue::from(ticket.metadata.section_count),
        ),
    ];

    Ok((StatusCode::OK, headers, artifact.bytes).into_response())
}
