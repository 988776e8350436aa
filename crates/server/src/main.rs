use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::{create_value, delete_value, get_value, list_values, update_value, ApiContext};
use shared::{
    domain::{NewValue, ValueId, ValueRecord, ValueUpdate},
    error::{ApiError, ErrorCode},
    protocol::{RootMessage, ROOT_MESSAGE, VALUES_PATH, VALUE_ITEM_ROUTE},
};
use storage::Storage;
use tracing::{error, info, warn};

mod config;

use config::{load_settings, normalize_database_url};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "values api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let collection = get(http_list_values).post(http_create_value);
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(VALUES_PATH, collection.clone())
        .route(VALUES_PATH.trim_end_matches('/'), collection)
        .route(
            VALUE_ITEM_ROUTE,
            get(http_get_value)
                .put(http_update_value)
                .delete(http_delete_value),
        )
        .with_state(state)
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: ROOT_MESSAGE.to_string(),
    })
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.api.storage.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            warn!(%error, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

async fn http_list_values(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ValueRecord>>> {
    list_values(&state.api).await.map(Json).map_err(reject)
}

async fn http_create_value(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewValue>,
) -> ApiResult<(StatusCode, Json<ValueRecord>)> {
    let value = create_value(&state.api, req).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(value)))
}

async fn http_get_value(
    State(state): State<Arc<AppState>>,
    Path(value_id): Path<i64>,
) -> ApiResult<Json<ValueRecord>> {
    get_value(&state.api, ValueId(value_id))
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_update_value(
    State(state): State<Arc<AppState>>,
    Path(value_id): Path<i64>,
    Json(req): Json<ValueUpdate>,
) -> ApiResult<Json<ValueRecord>> {
    update_value(&state.api, ValueId(value_id), req)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_delete_value(
    State(state): State<Arc<AppState>>,
    Path(value_id): Path<i64>,
) -> ApiResult<Json<ValueRecord>> {
    delete_value(&state.api, ValueId(value_id))
        .await
        .map(Json)
        .map_err(reject)
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => {
            error!(detail = %err.message, "values api internal error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
