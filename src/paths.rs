use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known filesystem layout of the node container.
#[derive(Debug, Clone)]
pub struct NodePaths {
    base_dir: PathBuf,
    node_dir: PathBuf,
}

impl NodePaths {
    pub fn new(base_dir: PathBuf, node_dir: PathBuf) -> Self {
        Self { base_dir, node_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.base_dir.join("configs")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// The persisted configuration written at the end of every boot and
    /// read back on the next one.
    pub fn local_conf(&self) -> PathBuf {
        self.configs_dir().join("local.conf")
    }

    /// Destination of the downloaded per-network default template.
    pub fn config_template(&self) -> PathBuf {
        self.configs_dir().join("waves-config.conf")
    }

    /// Destination of the downloaded node jar. `label` is the raw version
    /// selector, so a `latest` container keeps a stable jar name across
    /// upgrades.
    pub fn node_jar(&self, label: &str) -> PathBuf {
        self.node_dir.join(format!("waves-all-{label}.jar"))
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.configs_dir(), self.data_dir(), self.node_dir.clone()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> NodePaths {
        NodePaths::new(PathBuf::from("/waves"), PathBuf::from("/waves-node"))
    }

    #[test]
    fn well_known_paths() {
        let p = paths();
        assert_eq!(p.local_conf(), PathBuf::from("/waves/configs/local.conf"));
        assert_eq!(
            p.config_template(),
            PathBuf::from("/waves/configs/waves-config.conf")
        );
        assert_eq!(p.data_dir(), PathBuf::from("/waves/data"));
        assert_eq!(
            p.node_jar("latest"),
            PathBuf::from("/waves-node/waves-all-latest.jar")
        );
    }

    #[test]
    fn ensure_dirs_creates_the_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let p = NodePaths::new(tmp.path().join("waves"), tmp.path().join("waves-node"));
        p.ensure_dirs().unwrap();
        assert!(p.configs_dir().is_dir());
        assert!(p.data_dir().is_dir());
        assert!(tmp.path().join("waves-node").is_dir());

        // Idempotent on an existing layout.
        p.ensure_dirs().unwrap();
    }
}
