use actix_web::{HttpResponse, get, http::header, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    AppState,
    error::AppError,
    file_server, mime,
    mode::{TreeSourceKind, static_asset_url},
    models::{
        files::{NodeKind, NodeResponse},
        settings::{CsvRowLimit, PreviewSettingsResponse},
    },
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(list_tree)
            .service(get_node)
            .service(get_file)
            .service(get_preview_settings),
    );
}

#[get("/healthz")]
async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "explorer-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "tree_source": state.source.kind()
    }))
}

#[derive(Deserialize)]
struct TreeQuery {
    path: Option<String>,
}

#[get("/tree")]
async fn list_tree(
    query: web::Query<TreeQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let path = query.path.as_deref().unwrap_or("");
    let nodes = state.source.list(path).await?;
    debug!(path, entries = nodes.len(), "listed tree");
    Ok(HttpResponse::Ok().json(nodes))
}

#[get("/node")]
async fn get_node(
    query: web::Query<TreeQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let path = required_path(query.path.as_deref())?;
    let node = state
        .source
        .find_by_path(path)
        .await?
        .ok_or_else(|| AppError::NotFound(path.to_string()))?;

    let category = match &node.kind {
        NodeKind::File { mime_type, .. } => Some(mime::category(&node.name, mime_type)),
        NodeKind::Folder { .. } => None,
    };
    Ok(HttpResponse::Ok().json(NodeResponse { node, category }))
}

#[derive(Deserialize)]
struct FileQuery {
    path: Option<String>,
    download: Option<String>,
}

#[get("/file")]
async fn get_file(
    query: web::Query<FileQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let path = required_path(query.path.as_deref())?;
    let download = query
        .download
        .as_deref()
        .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1");

    let physical = state.resolver.resolve(path)?;

    if state.source.kind() == TreeSourceKind::Static {
        let location = static_asset_url(
            &state.config.static_files_url,
            &state.resolver.logical_path(&physical),
        );
        debug!(path, %location, "redirecting to static asset");
        return Ok(HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish());
    }

    let served = file_server::serve(&physical, download).await?;
    info!(
        path,
        bytes = served.len(),
        mime_type = served.mime_type,
        download,
        "serving file"
    );
    Ok(served.into_response())
}

#[get("/config")]
async fn get_preview_settings(state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;
    HttpResponse::Ok().json(PreviewSettingsResponse {
        mode: config.mode,
        tree_source: state.source.kind(),
        max_text_file_size: config.preview.max_text_file_size,
        csv_row_limit: CsvRowLimit {
            normal: config.preview.csv_row_limit,
            expanded: config.preview.csv_row_limit_expanded,
        },
    })
}

fn required_path(path: Option<&str>) -> Result<&str, AppError> {
    path.filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest("path parameter is required".into()))
}
