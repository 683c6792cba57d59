use std::sync::atomic::Ordering;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use excuse_common::{ExcuseForm, ExcuseResponse};

use crate::error::GenerationError;
use crate::state::AppState;

const SERVICE_NAME: &str = "excuse-email-tool";

pub async fn generate_excuse(
    State(st): State<AppState>,
    payload: Result<Json<ExcuseForm>, JsonRejection>,
) -> Response {
    let request_id = format!("req_{}", Uuid::new_v4());
    let span = tracing::info_span!("generate_excuse", %request_id);

    let result = match payload {
        Ok(Json(form)) => st.generator.generate(&form).instrument(span.clone()).await,
        Err(rejection) => Err(GenerationError::MalformedBody(rejection.body_text())),
    };

    let (status, body) = match result {
        Ok(email) => {
            st.metrics.generations_ok.fetch_add(1, Ordering::Relaxed);
            (
                StatusCode::OK,
                ExcuseResponse::success(email.subject, email.body),
            )
        }
        Err(e) => {
            span.in_scope(|| tracing::warn!(kind = e.kind(), error = %e, "excuse generation failed"));
            st.metrics.record_failure(&e);
            (e.status_code(), ExcuseResponse::failure(e.to_string()))
        }
    };

    let mut resp = (status, Json(body)).into_response();
    if let Ok(v) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert("x-request-id", v);
    }
    resp
}

pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "service": SERVICE_NAME})),
    )
}

pub async fn debug_info(State(st): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "generator": st.config.redacted(),
        })),
    )
}
