use std::{
    env,
    path::{Component, Path, PathBuf},
};

use tracing::warn;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AppError> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            env::current_dir()?.join(root)
        };
        Ok(Self {
            root: normalize(&absolute),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, logical_path: &str) -> Result<PathBuf, AppError> {
        let relative = logical_path
            .strip_prefix('/')
            .or_else(|| logical_path.strip_prefix('\\'))
            .unwrap_or(logical_path);
        let target = normalize(&self.root.join(relative));

        if target.starts_with(&self.root) {
            Ok(target)
        } else {
            warn!(
                requested = logical_path,
                resolved = %target.display(),
                root = %self.root.display(),
                "rejected path outside root"
            );
            Err(AppError::AccessDenied(logical_path.to_string()))
        }
    }

    pub fn logical_path(&self, physical: &Path) -> String {
        format!("/{}", relative_id(&self.root, physical))
    }
}

pub fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// `..` never climbs above the filesystem root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(root: &str) -> PathResolver {
        PathResolver::new(root).unwrap()
    }

    #[test]
    fn resolves_inside_root() {
        let resolver = resolver("/data");
        assert_eq!(
            resolver.resolve("/docs/a.md").unwrap(),
            PathBuf::from("/data/docs/a.md")
        );
        assert_eq!(resolver.resolve("docs/a.md").unwrap(), PathBuf::from("/data/docs/a.md"));
        assert_eq!(resolver.resolve("/").unwrap(), PathBuf::from("/data"));
        assert_eq!(resolver.resolve("").unwrap(), PathBuf::from("/data"));
    }

    #[test]
    fn dot_segments_are_resolved_lexically() {
        let resolver = resolver("/data");
        assert_eq!(resolver.resolve("/a/./../b").unwrap(), PathBuf::from("/data/b"));
        assert_eq!(
            resolver.resolve("/a/../../data/x").unwrap(),
            PathBuf::from("/data/x")
        );
    }

    #[test]
    fn traversal_is_denied() {
        let resolver = resolver("/data");
        for attempt in ["/../etc/passwd", "../../etc/passwd", "/docs/../../etc", "//etc/passwd"] {
            assert!(
                matches!(resolver.resolve(attempt), Err(AppError::AccessDenied(_))),
                "{attempt} should be denied"
            );
        }
    }

    #[test]
    fn containment_is_segment_aligned() {
        let resolver = resolver("/a/b");
        assert!(matches!(
            resolver.resolve("/../bc/file.txt"),
            Err(AppError::AccessDenied(_))
        ));
        assert!(resolver.resolve("/c/../file.txt").is_ok());
    }

    #[test]
    fn root_itself_is_normalized() {
        let resolver = resolver("/srv/./files/../files/");
        assert_eq!(resolver.root(), Path::new("/srv/files"));
        assert_eq!(
            resolver.resolve("/x.txt").unwrap(),
            PathBuf::from("/srv/files/x.txt")
        );
    }

    #[test]
    fn logical_path_uses_forward_slashes() {
        let resolver = resolver("/data");
        assert_eq!(
            resolver.logical_path(Path::new("/data/docs/a.md")),
            "/docs/a.md"
        );
        assert_eq!(resolver.logical_path(Path::new("/data")), "/");
        assert_eq!(relative_id(Path::new("/data"), Path::new("/data/x/y")), "x/y");
    }
}
