//! Request handlers: each endpoint is one linear pipeline from normalized
//! input through the vision provider to an interpreted result.
//!
//! Every pipeline failure is converted at the handler boundary into a 400
//! with the failure's description in a JSON `detail` body, matching the
//! contract the frontends were built against. Unparseable model output is
//! not a failure; it surfaces as a sentinel value in a 200.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use logging::redact_sensitive_data;
use sightgate_core::{ExtractedResult, ImageReference, SightError, VisionRequest};
use sightgate_vision::{interpret_code, interpret_decision, interpret_numeric_id, prompts};

use crate::server::AppState;

/// Sentinel returned when the model's reply holds no valid Aadhaar number.
pub const INVALID_AADHAR: &str = "Invalid Aadhar number detected";
/// Sentinel returned when the model's reply holds no plausible code value.
pub const NO_BARCODE: &str = "No valid barcode detected";

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub video_url: String,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(err: &SightError) -> ApiError {
    let detail = redact_sensitive_data(&err.to_string());
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail })))
}

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sightgate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for `POST /detect`: is the image showing plastic garbage?
pub async fn detect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(image_len = request.image.len(), "received detect request");

    let yes = run_detect(&state, &request.image).await.map_err(|e| {
        error!(error = %e, "detect pipeline failed");
        bad_request(&e)
    })?;

    Ok(Json(json!({
        "plastic_garbage": if yes { "YES" } else { "NO" }
    })))
}

async fn run_detect(state: &AppState, image: &str) -> Result<bool, SightError> {
    let reference = media::normalize_image_input(image)?;
    let reply = state
        .provider
        .complete(&image_request(state, prompts::PLASTIC_GARBAGE, &reference))
        .await?;
    Ok(interpret_decision(&reply))
}

/// Handler for `POST /analyze?video_url=...`: describe a short garbage
/// disposal video. The reply is the model's free text, uninterpreted.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Value>, ApiError> {
    let text = run_analyze(&state, &params.video_url).await.map_err(|e| {
        error!(error = %e, "analyze pipeline failed");
        bad_request(&e)
    })?;

    Ok(Json(json!({ "result": text })))
}

async fn run_analyze(state: &AppState, video_url: &str) -> Result<String, SightError> {
    let video = media::download_video(&state.http, video_url).await?;

    let frames = media::extract_frames(video.path()).await?;
    info!(frames = frames.len(), "composing frame grid");

    let grid = media::compose_grid(&frames)?;
    let reference = ImageReference::Base64 {
        payload: media::encode_jpeg(&grid)?,
        mime_type: "image/jpeg".into(),
    };

    let request = VisionRequest {
        model: state.models.video_model.clone(),
        system_prompt: Some(prompts::DISPOSAL_SYSTEM.to_string()),
        user_prompt: prompts::DISPOSAL_ANALYSIS.to_string(),
        image_url: reference.as_content_url(),
        temperature: 0.0,
        max_tokens: 200,
    };
    state.provider.complete(&request).await
    // `video` drops here: the temp file is removed on success and failure alike.
}

/// Handler for `POST /aadhar`: extract a 12-digit Aadhaar number.
pub async fn aadhar(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(image_len = request.image.len(), "received aadhar request");

    let result = run_extraction(&state, prompts::AADHAR_NUMBER, &request.image)
        .await
        .map(|reply| interpret_numeric_id(&reply))
        .map_err(|e| {
            error!(error = %e, "aadhar pipeline failed");
            bad_request(&e)
        })?;

    let number = match result {
        ExtractedResult::NumericId { digits } => digits,
        _ => INVALID_AADHAR.to_string(),
    };
    Ok(Json(json!({ "aadhar_number": number })))
}

/// Handler for `POST /barcode`: read a barcode value off the image.
pub async fn barcode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(image_len = request.image.len(), "received barcode request");

    let result = run_extraction(&state, prompts::BARCODE_VALUE, &request.image)
        .await
        .map(|reply| interpret_code(&reply))
        .map_err(|e| {
            error!(error = %e, "barcode pipeline failed");
            bad_request(&e)
        })?;

    let value = match result {
        ExtractedResult::CodeValue { text } => text,
        _ => NO_BARCODE.to_string(),
    };
    Ok(Json(json!({ "barcode": value })))
}

/// Shared single-image pipeline: normalize, ask the model, return raw text.
async fn run_extraction(
    state: &AppState,
    prompt: &str,
    image: &str,
) -> Result<String, SightError> {
    let reference = media::normalize_image_input(image)?;
    state
        .provider
        .complete(&image_request(state, prompt, &reference))
        .await
}

fn image_request(state: &AppState, prompt: &str, reference: &ImageReference) -> VisionRequest {
    VisionRequest {
        model: state.models.image_model.clone(),
        system_prompt: None,
        user_prompt: prompt.to_string(),
        image_url: reference.as_content_url(),
        temperature: 0.0,
        max_tokens: 100,
    }
}
