use crate::app::coordinator::DependencyAnalyser;
use crate::app::dto::*;
use crate::domain::error::{AnalysisError, ErrorKind};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response, Sse,
        sse::{Event, KeepAlive},
    },
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct HttpState {
    pub analyser: DependencyAnalyser,
}

#[derive(Debug, Clone, Deserialize)]
struct PathQuery {
    path: String,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidPath => StatusCode::NOT_FOUND,
        ErrorKind::ParseFailure | ErrorKind::NoSources => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::IoFailure | ErrorKind::Runtime => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: &AnalysisError) -> impl IntoResponse {
    (status_for(err.kind()), Json(ErrorResponse::from(err)))
}

pub fn build_router(analyser: DependencyAnalyser) -> Router {
    let state = Arc::new(HttpState { analyser });

    Router::new()
        .route("/health", get(health))
        .route("/class", get(class))
        .route("/package", get(package))
        .route("/project", get(project))
        .route("/stream", get(stream))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(analyser: DependencyAnalyser, addr: SocketAddr) -> Result<()> {
    let app = build_router(analyser);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "http server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse::default())
}

async fn class(State(state): State<Arc<HttpState>>, Query(q): Query<PathQuery>) -> Response {
    match state.analyser.class_dependencies(&q.path).await {
        Ok(report) => Json(ClassReportDto::from(&report)).into_response(),
        Err(e) => api_error(&e).into_response(),
    }
}

async fn package(State(state): State<Arc<HttpState>>, Query(q): Query<PathQuery>) -> Response {
    match state.analyser.package_dependencies(&q.path).await {
        Ok(report) => Json(PackageReportDto::from(&report)).into_response(),
        Err(e) => api_error(&e).into_response(),
    }
}

async fn project(State(state): State<Arc<HttpState>>, Query(q): Query<PathQuery>) -> Response {
    match state.analyser.project_dependencies(&q.path).await {
        Ok(report) => Json(ProjectReportDto::from(&report)).into_response(),
        Err(e) => api_error(&e).into_response(),
    }
}

/// `class` event per file, then one `complete` or `error` event.
async fn stream(
    State(state): State<Arc<HttpState>>,
    Query(q): Query<PathQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(state.analyser.config().stream_buffer.max(1));
    let mut events = state.analyser.analyze_dependencies_stream(&q.path).subscribe();

    state.analyser.runtime().spawn(async move {
        let mut files = 0usize;
        while let Some(item) = events.next().await {
            let event = match item {
                Ok(event) => {
                    files += 1;
                    sse_json("class", &ClassEventDto::from(event))
                }
                Err(err) => {
                    let _ = tx.send(sse_json("error", &ErrorResponse::from(&err))).await;
                    return;
                }
            };
            if tx.send(event).await.is_err() {
                return;
            }
        }
        let _ = tx.send(sse_json("complete", &StreamSummary { files })).await;
    });

    Sse::new(ReceiverStream::new(rx).map(Ok)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn sse_json<T: Serialize>(name: &str, payload: &T) -> Event {
    let event = Event::default().event(name);
    match serde_json::to_string(payload) {
        Ok(data) => event.data(data),
        Err(_) => event,
    }
}
