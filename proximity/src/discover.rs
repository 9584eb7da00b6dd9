use anyhow::{bail, Result};
use posindex::{DocId, DocumentRef, DocumentSource};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `.txt` files found under a directory, in a stable order. Doc ids are 1-based
/// indices into `paths`.
#[derive(Debug, Clone, Default)]
pub struct FileCorpus {
    paths: Vec<PathBuf>,
}

impl FileCorpus {
    /// Walk `root` recursively and keep regular files with a `txt` extension.
    /// A single file is accepted as a one-document corpus.
    pub fn discover(root: &Path) -> Result<Self> {
        if root.is_file() {
            return Ok(Self { paths: vec![root.to_path_buf()] });
        }
        if !root.is_dir() {
            bail!("input path {} is not a file or directory", root.display());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                paths.push(p.to_path_buf());
            }
        }
        tracing::info!(root = %root.display(), files = paths.len(), "discovered corpus files");
        Ok(Self { paths })
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self { Self { paths } }

    pub fn len(&self) -> usize { self.paths.len() }

    pub fn is_empty(&self) -> bool { self.paths.is_empty() }

    pub fn path(&self, id: DocId) -> Option<&Path> {
        (id as usize).checked_sub(1).and_then(|i| self.paths.get(i)).map(PathBuf::as_path)
    }
}

impl DocumentSource for FileCorpus {
    fn documents(&self) -> Vec<DocumentRef> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| DocumentRef { id: i as DocId + 1, label: p.display().to_string() })
            .collect()
    }

    fn open(&self, id: DocId) -> io::Result<Box<dyn BufRead + '_>> {
        let path = self
            .path(id)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no document with id {id}")))?;
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn label(&self, id: DocId) -> Option<String> {
        self.path(id).map(|p| p.display().to_string())
    }
}
