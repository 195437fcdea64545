//! On-disk artifacts.
//!
//! Each pipeline stage reads and writes fixed file names inside one output
//! directory. Node sets are JSON arrays of [`ParsedNode`]; the bundle and
//! report are plain text.
//!
//! Writes go through an [`ArtifactBatch`]: every file is first written to a
//! sibling temp file and only renamed into place once all of them are
//! staged, so a failed write leaves the previous artifacts untouched.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::node::ParsedNode;

pub const RAW_NODES_FILE: &str = "raw_nodes.txt";
pub const PROCESSED_NODES_FILE: &str = "processed_nodes.json";
pub const TESTED_NODES_FILE: &str = "tested_nodes.json";
pub const FILTERED_NODES_FILE: &str = "filtered_nodes.json";
pub const SUBSCRIPTION_FILE: &str = "subscription.txt";
pub const REPORT_FILE: &str = "README.md";

/// Which node set an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSet {
    /// Parsed and deduplicated, not yet probed
    Processed,
    /// Probed, latency recorded on every node
    Tested,
    /// Selected, fastest first
    Filtered,
}

impl NodeSet {
    pub fn file_name(&self) -> &'static str {
        match self {
            NodeSet::Processed => PROCESSED_NODES_FILE,
            NodeSet::Tested => TESTED_NODES_FILE,
            NodeSet::Filtered => FILTERED_NODES_FILE,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{} not found", .0.display())]
    Missing(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed node set in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Artifact contents waiting to be committed by [`ArtifactStore::commit`].
#[derive(Debug, Default)]
pub struct ArtifactBatch {
    files: Vec<(&'static str, Vec<u8>)>,
}

impl ArtifactBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor lines, newline terminated.
    pub fn raw_lines(mut self, lines: &[String]) -> Self {
        let mut text = lines.join("\n");
        text.push('\n');
        self.files.push((RAW_NODES_FILE, text.into_bytes()));
        self
    }

    pub fn nodes(mut self, set: NodeSet, nodes: &[ParsedNode]) -> Result<Self, StorageError> {
        let json = serde_json::to_vec_pretty(nodes).map_err(|source| StorageError::Malformed {
            path: PathBuf::from(set.file_name()),
            source,
        })?;
        self.files.push((set.file_name(), json));
        Ok(self)
    }

    pub fn bundle(mut self, bundle: &str) -> Self {
        self.files.push((SUBSCRIPTION_FILE, bundle.as_bytes().to_vec()));
        self
    }

    pub fn report(mut self, markdown: &str) -> Self {
        self.files.push((REPORT_FILE, markdown.as_bytes().to_vec()));
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reads and writes pipeline artifacts in one directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    /// Descriptor lines, one per line, blank lines skipped.
    pub async fn read_raw_lines(&self) -> Result<Vec<String>, StorageError> {
        let text = self.read_text(RAW_NODES_FILE).await?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn write_raw_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        self.commit(ArtifactBatch::new().raw_lines(lines)).await
    }

    pub async fn read_nodes(&self, set: NodeSet) -> Result<Vec<ParsedNode>, StorageError> {
        let path = self.path(set.file_name());
        let bytes = self.read_bytes(&path).await?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed { path, source })
    }

    pub async fn write_nodes(&self, set: NodeSet, nodes: &[ParsedNode]) -> Result<(), StorageError> {
        self.commit(ArtifactBatch::new().nodes(set, nodes)?).await
    }

    pub async fn write_bundle(&self, bundle: &str) -> Result<(), StorageError> {
        self.commit(ArtifactBatch::new().bundle(bundle)).await
    }

    pub async fn write_report(&self, markdown: &str) -> Result<(), StorageError> {
        self.commit(ArtifactBatch::new().report(markdown)).await
    }

    pub async fn read_text(&self, file_name: &str) -> Result<String, StorageError> {
        let path = self.path(file_name);
        let bytes = self.read_bytes(&path).await?;
        String::from_utf8(bytes).map_err(|e| StorageError::Io {
            path,
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::Missing(path.to_path_buf()))
            }
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write every file of the batch.
    ///
    /// All files are staged as `.<name>.tmp` before the first rename. If
    /// staging fails, the staged temp files are removed and no artifact is
    /// replaced. A rename failure after staging can still leave the set
    /// partially replaced.
    pub async fn commit(&self, batch: ArtifactBatch) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| StorageError::Io {
                path: self.directory.clone(),
                source,
            })?;

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(batch.len());
        for (file_name, contents) in &batch.files {
            let temp_path = self.path(&format!(".{}.tmp", file_name));
            if let Err(source) = tokio::fs::write(&temp_path, contents).await {
                for (temp_path, _) in &staged {
                    let _ = tokio::fs::remove_file(temp_path).await;
                }
                return Err(StorageError::Io {
                    path: self.path(file_name),
                    source,
                });
            }
            staged.push((temp_path, self.path(file_name)));
        }

        for (temp_path, path) in staged {
            if let Err(source) = tokio::fs::rename(&temp_path, &path).await {
                return Err(StorageError::Io { path, source });
            }
        }
        Ok(())
    }
}
