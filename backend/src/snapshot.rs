use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use tracing::info;

use crate::{error::AppError, models::files::Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticSnapshot {
    nodes: Vec<Node>,
}

impl StaticSnapshot {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            top_level = snapshot.nodes.len(),
            "loaded static snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let nodes: Vec<Node> = serde_json::from_reader(reader)?;
        Ok(Self { nodes })
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let nodes: Vec<Node> = serde_json::from_str(raw)?;
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn list(&self, logical_path: &str) -> &[Node] {
        if logical_path.is_empty() || logical_path == "/" {
            return &self.nodes;
        }
        self.find(|node| node.is_folder() && node.logical_path == logical_path)
            .and_then(Node::children)
            .unwrap_or(&[])
    }

    pub fn find_by_path(&self, logical_path: &str) -> Option<&Node> {
        self.find(|node| node.logical_path == logical_path)
    }

    fn find<P>(&self, predicate: P) -> Option<&Node>
    where
        P: Fn(&Node) -> bool,
    {
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if predicate(node) {
                return Some(node);
            }
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev());
            }
        }
        None
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), AppError> {
        serde_json::to_writer_pretty(writer, &self.nodes)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
