use serde::Serialize;

use crate::mode::{BrowseMode, TreeSourceKind};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRowLimit {
    pub normal: usize,
    pub expanded: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSettingsResponse {
    pub mode: BrowseMode,
    pub tree_source: TreeSourceKind,
    pub max_text_file_size: u64,
    pub csv_row_limit: CsvRowLimit,
}
