use std::{path::PathBuf, str::FromStr, sync::Arc};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::AppConfig, error::AppError, resolver::PathResolver, snapshot::StaticSnapshot,
    source::TreeSource, tree::TreeBuilder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseMode {
    Local,
    Files,
}

impl FromStr for BrowseMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("local") {
            Ok(BrowseMode::Local)
        } else if value.eq_ignore_ascii_case("files") {
            Ok(BrowseMode::Files)
        } else {
            Err(format!("unknown browse mode `{value}`, expected `local` or `files`"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeSourceKind {
    Dynamic,
    Static,
}

pub fn effective_root(config: &AppConfig) -> PathBuf {
    match config.mode {
        BrowseMode::Local => config.root_path.clone(),
        BrowseMode::Files if config.files_folder.enabled => {
            config.project_dir.join(&config.files_folder.folder_path)
        }
        BrowseMode::Files => {
            warn!(
                root = %config.root_path.display(),
                "files mode requested but FILES_MODE_ENABLED is false, using ROOT_PATH"
            );
            config.root_path.clone()
        }
    }
}

pub fn tree_source_kind(config: &AppConfig) -> TreeSourceKind {
    if config.static_deployment {
        TreeSourceKind::Static
    } else {
        TreeSourceKind::Dynamic
    }
}

pub fn select_source(config: &AppConfig, resolver: &PathResolver) -> Result<TreeSource, AppError> {
    let kind = tree_source_kind(config);
    info!(?kind, mode = ?config.mode, root = %resolver.root().display(), "selected tree source");

    match kind {
        TreeSourceKind::Dynamic => Ok(TreeSource::Dynamic {
            builder: TreeBuilder::new(resolver.root(), config.preview.max_text_file_size),
            resolver: resolver.clone(),
        }),
        TreeSourceKind::Static => {
            let snapshot = StaticSnapshot::open(&config.snapshot_path)?;
            Ok(TreeSource::Static(Arc::new(snapshot)))
        }
    }
}

pub fn static_asset_url(base_url: &str, logical_path: &str) -> String {
    let encoded = logical_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", base_url.trim_end_matches('/'), encoded)
}
