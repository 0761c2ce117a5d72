use std::{
    cmp::Ordering,
    collections::VecDeque,
    fs::Metadata,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, warn};

use crate::{
    collate::compare_names,
    mime,
    models::files::{Node, NodeKind},
    resolver::relative_id,
};

#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: PathBuf,
    max_inline_size: u64,
}

struct PendingDir {
    path: PathBuf,
    parent: Option<(usize, usize)>,
}

struct Slot {
    nodes: Vec<Node>,
    parent: Option<(usize, usize)>,
}

// Symlinks are listed but never descended into.
struct Listed {
    node: Node,
    descend: bool,
}

impl TreeBuilder {
    pub fn new(root: impl Into<PathBuf>, max_inline_size: u64) -> Self {
        Self {
            root: root.into(),
            max_inline_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn build_root(&self) -> Vec<Node> {
        self.build(&self.root).await
    }

    pub async fn build(&self, dir: &Path) -> Vec<Node> {
        let top = match self.list_dir(dir).await {
            Ok(listed) => listed,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "failed to list directory");
                return Vec::new();
            }
        };
        self.expand(dir, top).await
    }

    pub async fn describe(&self, path: &Path) -> Option<Node> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        let metadata = fs::metadata(path).await.ok()?;
        let mut node = self.entry_node(path, name, &metadata).await;
        if let NodeKind::Folder { children } = &mut node.kind
            && !fs::symlink_metadata(path).await.ok()?.file_type().is_symlink()
        {
            *children = self.build(path).await;
        }
        Some(node)
    }

    async fn expand(&self, dir: &Path, top: Vec<Listed>) -> Vec<Node> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut queue: VecDeque<PendingDir> = VecDeque::new();

        self.push_slot(&mut slots, &mut queue, dir, top, None);

        while let Some(pending) = queue.pop_front() {
            let listed = match self.list_dir(&pending.path).await {
                Ok(listed) => listed,
                Err(err) => {
                    warn!(
                        path = %pending.path.display(),
                        error = %err,
                        "failed to list subdirectory, leaving it empty"
                    );
                    Vec::new()
                }
            };
            self.push_slot(&mut slots, &mut queue, &pending.path, listed, pending.parent);
        }

        while let Some(slot) = slots.pop() {
            match slot.parent {
                Some((parent, position)) => {
                    if let NodeKind::Folder { children } = &mut slots[parent].nodes[position].kind {
                        *children = slot.nodes;
                    }
                }
                None => return slot.nodes,
            }
        }
        Vec::new()
    }

    fn push_slot(
        &self,
        slots: &mut Vec<Slot>,
        queue: &mut VecDeque<PendingDir>,
        dir: &Path,
        listed: Vec<Listed>,
        parent: Option<(usize, usize)>,
    ) {
        let index = slots.len();
        let mut nodes = Vec::with_capacity(listed.len());
        for (position, Listed { node, descend }) in listed.into_iter().enumerate() {
            if descend && node.is_folder() {
                queue.push_back(PendingDir {
                    path: dir.join(&node.name),
                    parent: Some((index, position)),
                });
            }
            nodes.push(node);
        }
        slots.push(Slot { nodes, parent });
    }

    async fn list_dir(&self, dir: &Path) -> std::io::Result<Vec<Listed>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut listed = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_symlink = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_symlink())
                .unwrap_or(true);
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            listed.push(Listed {
                node: self.entry_node(&path, name, &metadata).await,
                descend: !is_symlink,
            });
        }

        listed.sort_by(|a, b| node_order(&a.node, &b.node));
        Ok(listed)
    }

    async fn entry_node(&self, path: &Path, name: String, metadata: &Metadata) -> Node {
        let id = relative_id(&self.root, path);
        let logical_path = format!("/{id}");
        let modified_at = metadata.modified().ok().map(DateTime::<Utc>::from);

        let kind = if metadata.is_dir() {
            NodeKind::Folder {
                children: Vec::new(),
            }
        } else {
            let size = metadata.len();
            NodeKind::File {
                size,
                mime_type: mime::classify(&name).to_string(),
                content: if metadata.is_file() {
                    self.inline_content(path, &name, size).await
                } else {
                    None
                },
            }
        };

        Node {
            id,
            name,
            logical_path,
            modified_at,
            kind,
        }
    }

    async fn inline_content(&self, path: &Path, name: &str, size: u64) -> Option<String> {
        if size >= self.max_inline_size || !mime::is_text_previewable(name) {
            return None;
        }

        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "could not read file for preview");
                return None;
            }
        };
        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                debug!(path = %path.display(), "file is not valid UTF-8, skipping preview");
                None
            }
        }
    }
}

pub fn node_order(a: &Node, b: &Node) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| compare_names(&a.name, &b.name))
}
