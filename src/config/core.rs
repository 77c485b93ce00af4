use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for entitymap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EntitymapConfig {
    /// File discovery settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Extraction engine settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// External parser used by the document-model backend
    #[serde(default)]
    pub delegate: DelegateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Source file extensions to scan, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names that are never descended into
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Glob patterns matched against the project-relative path
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Scan files on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
            ignore: Vec::new(),
            parallel: default_parallel(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_parallel() -> bool {
    true
}

/// How methods and properties are associated with classes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentScope {
    /// Attach members to the class whose body lexically contains them
    #[default]
    Body,
    /// Attach every member found in a file to every class in that file
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub scope: AttachmentScope,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelegateConfig {
    /// Program to run
    #[serde(default = "default_delegate_program")]
    pub program: String,

    /// Arguments placed before the script path
    #[serde(default = "default_delegate_args")]
    pub args: Vec<String>,

    /// Parser script; resolved relative to the current directory when relative
    #[serde(default)]
    pub script: Option<PathBuf>,
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            program: default_delegate_program(),
            args: default_delegate_args(),
            script: None,
        }
    }
}

fn default_delegate_program() -> String {
    "npx".to_string()
}

fn default_delegate_args() -> Vec<String> {
    vec!["ts-node".to_string()]
}
