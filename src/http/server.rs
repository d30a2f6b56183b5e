//! REST API over the shared use-cases

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::response::{ApiError, ApiResponse, ApiResult};
use crate::app::AppContext;
use crate::config::HttpConfig;
use crate::error::{DesignError, Result};
use crate::usecases::{DeleteResult, UpsertResult};

fn cors_layer(config: &HttpConfig) -> Result<CorsLayer> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }

    let origin = HeaderValue::from_str(config.cors_origin.trim())
        .map_err(|e| DesignError::Config(format!("invalid CORS origin: {}", e)))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Build the router
pub fn router(ctx: AppContext, config: &HttpConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/api/features", post(upsert_feature))
        .route("/api/features/:name", delete(delete_feature))
        .route("/api/terms", post(upsert_term))
        .route("/api/terms/:name", delete(delete_term))
        .route("/api/details", post(get_details))
        .route("/api/resources/features", get(feature_index))
        .route("/api/resources/terms", get(term_index))
        .route("/api/resources/statistics", get(statistics))
        .route("/api/health", get(health))
        .with_state(ctx)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}

/// REST server
pub struct HttpServer {
    ctx: AppContext,
    config: HttpConfig,
}

impl HttpServer {
    pub fn new(ctx: AppContext, config: HttpConfig) -> Self {
        Self { ctx, config }
    }

    /// Bind the configured host and port, resolving host names
    pub async fn bind(&self) -> Result<tokio::net::TcpListener> {
        let address = self.config.bind_address()?;
        Ok(tokio::net::TcpListener::bind(address).await?)
    }

    /// Start the server and run until ctrl-c
    pub async fn start(self) -> Result<()> {
        let listener = self.bind().await?;
        let app = router(self.ctx, &self.config)?;
        tracing::info!("REST API listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down REST API");
            })
            .await?;

        Ok(())
    }
}

fn upsert_response(result: UpsertResult) -> ApiResult {
    let status = if result.is_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let message = result.message.clone();
    Ok(ApiResponse::ok(message, result).with_status(status))
}

fn delete_response(result: DeleteResult) -> ApiResult {
    if !result.found {
        return Err(ApiError::not_found(result.message));
    }
    let message = result.message.clone();
    Ok(ApiResponse::ok(message, result).with_status(StatusCode::OK))
}

async fn upsert_feature(
    State(ctx): State<AppContext>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload?;
    upsert_response(ctx.add_or_update_feature.execute(&body).await?)
}

async fn upsert_term(
    State(ctx): State<AppContext>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload?;
    upsert_response(ctx.add_or_update_term.execute(&body).await?)
}

async fn delete_feature(State(ctx): State<AppContext>, Path(name): Path<String>) -> ApiResult {
    delete_response(ctx.delete_feature.execute(&name).await?)
}

async fn delete_term(State(ctx): State<AppContext>, Path(name): Path<String>) -> ApiResult {
    delete_response(ctx.delete_term.execute(&name).await?)
}

async fn get_details(
    State(ctx): State<AppContext>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let Json(body) = payload?;
    let result = ctx.get_details.execute(&body).await?;
    Ok(ApiResponse::ok(result.message(), result.to_json()).with_status(StatusCode::OK))
}

async fn feature_index(State(ctx): State<AppContext>) -> ApiResult {
    let features = ctx.catalog.feature_index().await?;
    let message = format!("{} feature(s)", features.len());
    Ok(ApiResponse::ok(message, json!({ "features": features })).with_status(StatusCode::OK))
}

async fn term_index(State(ctx): State<AppContext>) -> ApiResult {
    let terms = ctx.catalog.term_index().await?;
    let message = format!("{} term(s)", terms.len());
    Ok(ApiResponse::ok(message, json!({ "terms": terms })).with_status(StatusCode::OK))
}

async fn statistics(State(ctx): State<AppContext>) -> ApiResult {
    let stats = ctx.catalog.statistics().await?;
    Ok(ApiResponse::ok("Statistics", stats).with_status(StatusCode::OK))
}

async fn health(State(ctx): State<AppContext>) -> ApiResult {
    match ctx.catalog.health(&ctx.data_path()).await {
        Ok(status) => Ok(ApiResponse::ok("Repository is healthy", status).with_status(StatusCode::OK)),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "unhealthy",
                e.to_string(),
            ))
        }
    }
}
