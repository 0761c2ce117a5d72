use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mime::FileCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "path")]
    pub logical_path: String,
    #[serde(
        rename = "modified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        size: u64,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Folder {
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn children(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn size(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { size, .. } => Some(size),
            NodeKind::Folder { .. } => None,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { mime_type, .. } => Some(mime_type),
            NodeKind::Folder { .. } => None,
        }
    }

    pub fn inline_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => content.as_deref(),
            NodeKind::Folder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeResponse {
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FileCategory>,
}
