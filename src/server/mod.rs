//! HTTP server adapter (axum)
//!
//! Maps axum routes and path extractors onto [`Route`] values and hands them
//! to the shared dispatcher. A middleware layer answers CORS preflight,
//! stamps CORS headers on every response, and logs each request.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use tokio::net::TcpListener;

use crate::api::{AppContext, CORS_HEADERS, Reply, Route, dispatch};
use crate::error::Result;

type Ctx = State<Arc<AppContext>>;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/admin/regressivos", get(list_cycles).post(create_cycle))
        .route(
            "/api/admin/regressivos/:id",
            get(get_cycle).put(update_cycle).delete(delete_cycle),
        )
        .route("/api/admin/regressivos/:id/iniciar-sla", post(start_sla))
        .route("/api/admin/regressivos/:id/parar-sla", post(stop_sla))
        .route("/api/admin/regressivos/:id/incluir-tempo", post(extend_sla))
        .route("/api/admin/regressivos/:id/release-notes", post(release_notes))
        .route("/api/admin/squads-config", get(get_squads_config).put(replace_squads_config))
        .route("/api/admin/squad-modulo/:id", delete(delete_entry))
        .route("/api/quality/regressivos", get(list_active_cycles))
        .route("/api/quality/regressivos/:id", get(cycle_details))
        .route("/api/quality/regressivos/:id/status-resumo", get(status_summary))
        .route("/api/quality/regressivos/:id/verificar-sla", get(verify_sla))
        .route("/api/quality/squad-modulo/:id", get(get_entry).put(update_entry))
        .fallback(not_found)
        .layer(middleware::from_fn(cors_and_log))
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, ctx: Arc<AppContext>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, ctx).await
}

/// Serve on an already bound listener.
pub async fn serve_on(listener: TcpListener, ctx: Arc<AppContext>) -> Result<()> {
    log::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn respond(ctx: &AppContext, route: Route, body: &str) -> Response {
    into_response(dispatch(ctx, Some(route), body).await)
}

fn into_response(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply.body_text()).into_response()
}

async fn cors_and_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = if method == Method::OPTIONS {
        into_response(Reply::empty())
    } else {
        let response = next.run(request).await;
        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            into_response(Reply::not_found_route())
        } else {
            response
        }
    };

    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            headers.insert(name, value);
        }
    }

    tracing::info!(method = %method, path = %path, status = response.status().as_u16(), "request");
    response
}

async fn not_found() -> Response {
    into_response(Reply::not_found_route())
}

async fn health(State(ctx): Ctx) -> Response {
    respond(&ctx, Route::Health, "").await
}

//=== Admin ===

async fn list_cycles(State(ctx): Ctx) -> Response {
    respond(&ctx, Route::ListCycles, "").await
}

async fn create_cycle(State(ctx): Ctx, body: String) -> Response {
    respond(&ctx, Route::CreateCycle, &body).await
}

async fn get_cycle(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::GetCycle(id), "").await
}

async fn update_cycle(State(ctx): Ctx, Path(id): Path<String>, body: String) -> Response {
    respond(&ctx, Route::UpdateCycle(id), &body).await
}

async fn delete_cycle(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::DeleteCycle(id), "").await
}

async fn start_sla(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::StartSla(id), "").await
}

async fn stop_sla(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::StopSla(id), "").await
}

async fn extend_sla(State(ctx): Ctx, Path(id): Path<String>, body: String) -> Response {
    respond(&ctx, Route::ExtendSla(id), &body).await
}

async fn release_notes(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::ReleaseNotes(id), "").await
}

async fn get_squads_config(State(ctx): Ctx) -> Response {
    respond(&ctx, Route::GetSquadsConfig, "").await
}

async fn replace_squads_config(State(ctx): Ctx, body: String) -> Response {
    respond(&ctx, Route::ReplaceSquadsConfig, &body).await
}

async fn delete_entry(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::DeleteEntry(id), "").await
}

//=== Quality ===

async fn list_active_cycles(State(ctx): Ctx) -> Response {
    respond(&ctx, Route::ListActiveCycles, "").await
}

async fn cycle_details(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::CycleDetails(id), "").await
}

async fn get_entry(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::GetEntry(id), "").await
}

async fn update_entry(State(ctx): Ctx, Path(id): Path<String>, body: String) -> Response {
    respond(&ctx, Route::UpdateEntry(id), &body).await
}

async fn status_summary(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::StatusSummary(id), "").await
}

async fn verify_sla(State(ctx): Ctx, Path(id): Path<String>) -> Response {
    respond(&ctx, Route::VerifySla(id), "").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_empty_body() {
        let response = into_response(Reply::empty());
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_into_response_maps_status() {
        let response = into_response(Reply::not_found_route());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }
}
