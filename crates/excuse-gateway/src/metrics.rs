use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::GenerationError;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct Metrics {
    pub requests_total: AtomicU64,
    pub requests_inflight: AtomicU64,
    pub status_2xx: AtomicU64,
    pub status_4xx: AtomicU64,
    pub status_5xx: AtomicU64,
    pub generations_ok: AtomicU64,
    pub validation_failures: AtomicU64,
    pub configuration_failures: AtomicU64,
    pub transport_failures: AtomicU64,
    pub upstream_failures: AtomicU64,
    pub parse_failures: AtomicU64,
}

impl Metrics {
    pub fn record_failure(&self, err: &GenerationError) {
        let counter = match err {
            GenerationError::Validation(_) | GenerationError::MalformedBody(_) => {
                &self.validation_failures
            }
            GenerationError::MissingCredential => &self.configuration_failures,
            GenerationError::Timeout(_) | GenerationError::Transport(_) => {
                &self.transport_failures
            }
            GenerationError::Upstream { .. } => &self.upstream_failures,
            GenerationError::Parse(_) => &self.parse_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn render_metrics(metrics: &Metrics) -> String {
    let series: [(&str, &str, &str, &AtomicU64); 11] = [
        ("requests_total", "counter", "Total requests handled.", &metrics.requests_total),
        ("requests_inflight", "gauge", "Currently in-flight requests.", &metrics.requests_inflight),
        ("responses_2xx", "counter", "Total 2xx responses.", &metrics.status_2xx),
        ("responses_4xx", "counter", "Total 4xx responses.", &metrics.status_4xx),
        ("responses_5xx", "counter", "Total 5xx responses.", &metrics.status_5xx),
        ("generations_ok", "counter", "Excuses generated successfully.", &metrics.generations_ok),
        ("validation_failures", "counter", "Requests rejected before calling the model.", &metrics.validation_failures),
        ("configuration_failures", "counter", "Requests failed by missing configuration.", &metrics.configuration_failures),
        ("transport_failures", "counter", "Model calls that failed to connect or timed out.", &metrics.transport_failures),
        ("upstream_failures", "counter", "Model calls answered with an error status.", &metrics.upstream_failures),
        ("parse_failures", "counter", "Model replies with no usable subject/body.", &metrics.parse_failures),
    ];

    let mut body = String::new();
    for (name, kind, help, value) in series {
        let _ = write!(
            body,
            "# HELP excuse_gateway_{name} {help}\n\
             # TYPE excuse_gateway_{name} {kind}\n\
             excuse_gateway_{name} {}\n",
            value.load(Ordering::Relaxed),
        );
    }
    body
}

pub async fn metrics_handler(State(st): State<AppState>) -> impl IntoResponse {
    let body = render_metrics(&st.metrics);
    (
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

pub async fn track_requests(
    State(st): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, std::convert::Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    st.metrics.requests_inflight.fetch_add(1, Ordering::Relaxed);
    let resp = next.run(req).await;
    st.metrics.requests_inflight.fetch_sub(1, Ordering::Relaxed);
    st.metrics.requests_total.fetch_add(1, Ordering::Relaxed);

    let status = resp.status().as_u16();
    if status >= 500 {
        st.metrics.status_5xx.fetch_add(1, Ordering::Relaxed);
    } else if status >= 400 {
        st.metrics.status_4xx.fetch_add(1, Ordering::Relaxed);
    } else if status >= 200 {
        st.metrics.status_2xx.fetch_add(1, Ordering::Relaxed);
    }

    tracing::info!(
        %method,
        %path,
        status,
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );

    Ok(resp)
}
