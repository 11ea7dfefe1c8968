use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;

const TABLE_ROUTE: &str = "/rest/v1/:table";

/// In-memory stand-in for the PostgREST endpoint of a single table.
#[derive(Debug, Clone)]
pub struct PostgrestState {
    api_key: Arc<str>,
    table: Arc<str>,
    rows: Arc<Mutex<Vec<ContactRow>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRow {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl PostgrestState {
    pub fn new(api_key: impl Into<Arc<str>>, table: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            table: table.into(),
            rows: Default::default(),
        }
    }

    /// Returns a copy of all rows inserted so far.
    pub async fn rows(&self) -> Vec<ContactRow> {
        self.rows.lock().await.clone()
    }
}

pub fn router(state: PostgrestState) -> Router<()> {
    Router::new()
        .route(TABLE_ROUTE, routing::post(insert).get(list))
        .with_state(state)
}

/// Serves the fake endpoint on an already bound listener.
pub async fn serve(listener: TcpListener, state: PostgrestState) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    api_key: String,
    table: String,
) -> anyhow::Result<()> {
    info!("Starting postgrest testing server on {host}:{port}");
    info!("Store url: http://{host}:{port}/");
    info!("Table: {table:?}");
    info!("Api key: {api_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, PostgrestState::new(api_key, table)).await
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

fn error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            code,
            message: message.into(),
        }),
    )
        .into_response()
}

fn check_access(state: &PostgrestState, headers: &HeaderMap, table: &str) -> Result<(), Response> {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if api_key != Some(&*state.api_key) || bearer != Some(&*state.api_key) {
        return Err(error(
            StatusCode::UNAUTHORIZED,
            "PGRST301",
            "Invalid API key",
        ));
    }

    if table != &*state.table {
        return Err(error(
            StatusCode::NOT_FOUND,
            "42P01",
            format!("relation \"public.{table}\" does not exist"),
        ));
    }

    Ok(())
}

async fn insert(
    state: State<PostgrestState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(row): Json<ContactRow>,
) -> Response {
    if let Err(response) = check_access(&state, &headers, &table) {
        return response;
    }

    if let Some(column) = [("name", &row.name), ("email", &row.email), ("message", &row.message)]
        .into_iter()
        .find_map(|(column, value)| value.is_empty().then_some(column))
    {
        return error(
            StatusCode::BAD_REQUEST,
            "23514",
            format!("new row for relation \"{table}\" violates check constraint \"{column}_not_empty\""),
        );
    }

    state.rows.lock().await.push(row);

    StatusCode::CREATED.into_response()
}

async fn list(
    state: State<PostgrestState>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = check_access(&state, &headers, &table) {
        return response;
    }

    Json(state.rows().await).into_response()
}
