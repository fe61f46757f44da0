use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::error::Error;
use crate::record::{DnsDidRecord, DocumentStoreRecord, GenericRecord, Record};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/records/:domain", get(records))
        .route("/document-store/:domain", get(document_store))
        .route("/dns-did/:domain", get(dns_did))
        .route("/generic/:domain", get(generic))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

type DomainPath = WithRejection<Path<String>, APIError>;

async fn records(
    State(state): State<AppState>,
    WithRejection(Path(domain), _): DomainPath,
) -> Result<Json<Vec<Record>>, APIError> {
    let records = state.resolver.records(&domain).await;
    Ok(Json(records.map_err(|err| lookup_failed(&domain, err))?))
}

async fn document_store(
    State(state): State<AppState>,
    WithRejection(Path(domain), _): DomainPath,
) -> Result<Json<Vec<DocumentStoreRecord>>, APIError> {
    let records = state.resolver.document_store_records(&domain).await;
    Ok(Json(records.map_err(|err| lookup_failed(&domain, err))?))
}

async fn dns_did(
    State(state): State<AppState>,
    WithRejection(Path(domain), _): DomainPath,
) -> Result<Json<Vec<DnsDidRecord>>, APIError> {
    let records = state.resolver.dns_did_records(&domain).await;
    Ok(Json(records.map_err(|err| lookup_failed(&domain, err))?))
}

async fn generic(
    State(state): State<AppState>,
    WithRejection(Path(domain), _): DomainPath,
) -> Result<Json<Vec<GenericRecord>>, APIError> {
    let records = state.resolver.generic_records(&domain).await;
    Ok(Json(records.map_err(|err| lookup_failed(&domain, err))?))
}

fn lookup_failed(domain: &str, err: Error) -> APIError {
    match err {
        Error::InvalidDomain(_) => tracing::debug!("rejected lookup for \"{domain}\": {err}"),
        _ => tracing::error!("lookup for \"{domain}\" failed: {err}"),
    }
    err.into()
}
