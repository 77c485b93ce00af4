use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Description tag attached to every class found by the decorator engine.
pub const CLASS_DOCS: &str = "Parsed with decorator pattern scan";

/// Build the synthesized signature description shared by methods and routes.
pub fn signature_docs(params: &str, return_type: &str) -> String {
    format!("Input: ({params})\nOutput: {return_type}")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub declared_type: String,
    #[serde(default)]
    pub decorators: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub docs: String,
    #[serde(default)]
    pub return_type: String,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, params: &str, return_type: &str) -> Self {
        Self {
            name: name.into(),
            docs: signature_docs(params, return_type),
            return_type: return_type.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub docs: String,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            docs: CLASS_DOCS.to_string(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }
}

/// Cardinality carried by a relationship edge.
///
/// The decorator engine only ever produces the four cardinality kinds.
/// `Ref` and `RefArray` come from the delegated document-model parser,
/// which reports interface references instead of decorators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    Ref,
    RefArray,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
            Self::Ref => "Ref",
            Self::RefArray => "RefArray",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipInfo {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Map a route decorator name (`Get`, `Post`, ...) to its verb.
    pub fn from_decorator(name: &str) -> Option<Self> {
        match name {
            "Get" => Some(Self::Get),
            "Post" => Some(Self::Post),
            "Put" => Some(Self::Put),
            "Delete" => Some(Self::Delete),
            "Patch" => Some(Self::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct APIFunctionInfo {
    pub name: String,
    pub method: HttpMethod,
    pub route: String,
    pub docs: String,
    pub return_type: String,
}

/// Root output document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub entities: Vec<ClassInfo>,
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub functions: Vec<APIFunctionInfo>,
    #[serde(default)]
    pub relationships: Vec<RelationshipInfo>,
}

impl ProjectMetadata {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.classes.is_empty()
            && self.functions.is_empty()
            && self.relationships.is_empty()
    }
}

/// Non-fatal problem met while scanning a project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionWarning {
    /// The file could not be read; it contributed nothing.
    UnreadableFile { path: PathBuf, message: String },
    /// A decorator buffer was flushed but did not match a property declaration.
    UnmatchedStatement {
        path: PathBuf,
        line: usize,
        text: String,
    },
    /// A property declaration sat outside every class body and was dropped.
    UnattachedStatement {
        path: PathBuf,
        line: usize,
        name: String,
    },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableFile { path, message } => {
                write!(f, "skipped unreadable file {}: {}", path.display(), message)
            }
            Self::UnmatchedStatement { path, line, text } => write!(
                f,
                "discarded decorator statement at {}:{}: {}",
                path.display(),
                line + 1,
                text
            ),
            Self::UnattachedStatement { path, line, name } => write!(
                f,
                "dropped property {} at {}:{}: not inside a class body",
                name,
                path.display(),
                line + 1
            ),
        }
    }
}

/// Everything an extraction run produced: the document plus collected warnings.
#[derive(Clone, Debug, Default)]
pub struct ExtractionReport {
    pub metadata: ProjectMetadata,
    pub warnings: Vec<ExtractionWarning>,
    pub files_scanned: usize,
}

impl ExtractionReport {
    pub fn from_metadata(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }
}
