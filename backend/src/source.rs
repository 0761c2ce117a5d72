use std::{path::Path, sync::Arc};

use crate::{
    error::AppError, mode::TreeSourceKind, models::files::Node, resolver::PathResolver,
    snapshot::StaticSnapshot, tree::TreeBuilder,
};

#[derive(Debug, Clone)]
pub enum TreeSource {
    Dynamic {
        builder: TreeBuilder,
        resolver: PathResolver,
    },
    Static(Arc<StaticSnapshot>),
}

impl TreeSource {
    pub fn kind(&self) -> TreeSourceKind {
        match self {
            TreeSource::Dynamic { .. } => TreeSourceKind::Dynamic,
            TreeSource::Static(_) => TreeSourceKind::Static,
        }
    }

    pub async fn list(&self, logical_path: &str) -> Result<Vec<Node>, AppError> {
        match self {
            TreeSource::Dynamic { builder, resolver } => {
                let dir = resolver.resolve(logical_path)?;
                if is_hidden(resolver, &dir) {
                    return Ok(Vec::new());
                }
                Ok(builder.build(&dir).await)
            }
            TreeSource::Static(snapshot) => Ok(snapshot.list(logical_path).to_vec()),
        }
    }

    pub async fn find_by_path(&self, logical_path: &str) -> Result<Option<Node>, AppError> {
        match self {
            TreeSource::Dynamic { builder, resolver } => {
                let target = resolver.resolve(logical_path)?;
                if is_hidden(resolver, &target) || target == resolver.root() {
                    return Ok(None);
                }
                Ok(builder.describe(&target).await)
            }
            TreeSource::Static(snapshot) => Ok(snapshot.find_by_path(logical_path).cloned()),
        }
    }
}

// Dot-prefixed segments are never walked, so they are never addressable.
fn is_hidden(resolver: &PathResolver, path: &Path) -> bool {
    resolver
        .logical_path(path)
        .split('/')
        .any(|segment| segment.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, TreeSource) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs").join("guide.md"), "# guide").unwrap();
        std::fs::write(dir.path().join("top.txt"), "top").unwrap();

        let resolver = PathResolver::new(dir.path()).unwrap();
        let source = TreeSource::Dynamic {
            builder: TreeBuilder::new(resolver.root(), 1024),
            resolver,
        };
        (dir, source)
    }

    #[tokio::test]
    async fn dynamic_and_static_sources_answer_alike() {
        let (_dir, dynamic) = fixture();
        let snapshot = StaticSnapshot::new(dynamic.list("/").await.unwrap());
        let fixed = TreeSource::Static(Arc::new(snapshot));

        for path in ["", "/", "/docs"] {
            let live = dynamic.list(path).await.unwrap();
            let stored = fixed.list(path).await.unwrap();
            let ids = |nodes: &[Node]| nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
            assert_eq!(ids(&live), ids(&stored), "listing {path:?}");
        }

        let live = dynamic.find_by_path("/docs/guide.md").await.unwrap().unwrap();
        let stored = fixed.find_by_path("/docs/guide.md").await.unwrap().unwrap();
        assert_eq!(live.inline_content(), stored.inline_content());
        assert_eq!(dynamic.kind(), TreeSourceKind::Dynamic);
        assert_eq!(fixed.kind(), TreeSourceKind::Static);
    }

    #[tokio::test]
    async fn dynamic_listing_enforces_containment() {
        let (_dir, dynamic) = fixture();
        assert!(matches!(
            dynamic.list("/../..").await,
            Err(AppError::AccessDenied(_))
        ));
        assert!(matches!(
            dynamic.find_by_path("/../etc/passwd").await,
            Err(AppError::AccessDenied(_))
        ));
    }

    #[tokio::test]
    async fn missing_paths_are_empty_or_absent() {
        let (_dir, dynamic) = fixture();
        assert!(dynamic.list("/nope").await.unwrap().is_empty());
        assert!(dynamic.find_by_path("/nope.txt").await.unwrap().is_none());
        assert!(dynamic.find_by_path("/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hidden_entries_are_not_addressable_as_nodes() {
        let (dir, dynamic) = fixture();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("docs").join(".draft.md"), "wip").unwrap();

        assert!(dynamic.find_by_path("/.git").await.unwrap().is_none());
        assert!(dynamic.find_by_path("/docs/.draft.md").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hidden_folders_are_not_listed() {
        let (dir, dynamic) = fixture();
        std::fs::create_dir(dir.path().join(".secrets")).unwrap();
        std::fs::write(dir.path().join(".secrets").join("keys.env"), "TOKEN=abc").unwrap();
        std::fs::create_dir(dir.path().join("docs").join(".cache")).unwrap();
        std::fs::write(dir.path().join("docs").join(".cache").join("a.txt"), "a").unwrap();

        let snapshot = StaticSnapshot::new(dynamic.list("/").await.unwrap());
        let fixed = TreeSource::Static(Arc::new(snapshot));

        for path in ["/.secrets", "/docs/.cache"] {
            assert!(dynamic.list(path).await.unwrap().is_empty(), "{path}");
            assert!(fixed.list(path).await.unwrap().is_empty(), "{path}");
        }
    }
}
