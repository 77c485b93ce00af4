use crate::config::ScanConfig;
use crate::core::{Error, ExtractionWarning, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Files found by a walk, plus entries that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Enumerates candidate source files under a project root.
///
/// Paths are returned relative to the root, sorted, so repeated runs over an
/// unchanged tree see files in the same order.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        let defaults = ScanConfig::default();
        Self {
            root,
            extensions: defaults.extensions,
            exclude_dirs: defaults.exclude_dirs,
            ignore_patterns: vec![],
        }
    }

    pub fn from_config(root: PathBuf, config: &ScanConfig) -> Result<Self> {
        Self::new(root)
            .with_extensions(config.extensions.clone())
            .with_exclude_dirs(config.exclude_dirs.clone())
            .with_ignore_patterns(&config.ignore)
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    /// Walk the tree. Entries that cannot be read are skipped and reported.
    pub fn walk(&self) -> Result<Discovery> {
        if !self.root.is_dir() {
            return Err(Error::ProjectNotFound {
                path: self.root.clone(),
            });
        }

        let mut discovery = Discovery::default();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    discovery.warnings.push(self.unreadable_entry(&e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                if self.should_process(relative) {
                    discovery.files.push(relative.to_path_buf());
                }
            }
        }

        Ok(discovery)
    }

    fn unreadable_entry(&self, error: &walkdir::Error) -> ExtractionWarning {
        let path = error
            .path()
            .map(|p| p.strip_prefix(&self.root).unwrap_or(p).to_path_buf())
            .unwrap_or_default();
        let message = error
            .io_error()
            .map_or_else(|| error.to_string(), |io| io.to_string());
        ExtractionWarning::UnreadableFile { path, message }
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .exclude_dirs
                .iter()
                .any(|dir| entry.file_name().to_string_lossy() == dir.as_str())
    }

    fn should_process(&self, relative: &Path) -> bool {
        let file_name = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        // Type declaration files carry no runtime declarations
        if file_name.ends_with(".d.ts") {
            return false;
        }

        let has_extension = relative
            .extension()
            .map(|ext| self.extensions.iter().any(|e| ext.to_string_lossy() == e.as_str()))
            .unwrap_or(false);
        if !has_extension {
            return false;
        }

        let path_str = to_forward_slashes(relative);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches(&path_str))
    }
}

pub fn find_project_files(root: &Path, config: &ScanConfig) -> Result<Discovery> {
    FileWalker::from_config(root.to_path_buf(), config)?.walk()
}

/// Render a relative path with `/` separators regardless of host conventions.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path as it appears in the metadata document: rooted, forward slashes.
pub fn display_path(relative: &Path) -> String {
    format!("/{}", to_forward_slashes(relative))
}
