//! Stateless pattern extractors.
//!
//! Every extractor takes text and returns zero or more matches; malformed
//! input yields no matches rather than an error. Offsets are byte offsets
//! into the text that was passed in, so callers can map matches back to lines.

use crate::core::{signature_docs, APIFunctionInfo, HttpMethod};
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:abstract\s+)?class\s+(\w+)")
        .expect("class header pattern is valid")
});

// Parameter list is captured bracket-naive: `[^)]*` stops at the first `)`.
static METHOD_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?:(?:public|private|protected)\s+)?(?:async\s+)?(\w+)\s*\(([^)]*)\)\s*:\s*([^{\n]+)",
    )
    .expect("method signature pattern is valid")
});

static PROPERTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*((?:@\w+(?:\(.*?\))?\s*)*)(?:(?:public|private|protected)\s+)?(\w+)\s*:\s*([^\n;]+);",
    )
    .expect("property pattern is valid")
});

static DECORATOR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)").expect("decorator name pattern is valid"));

static ROUTE_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"@(Get|Post|Put|Delete|Patch)\(['"]([^'"]+)['"]\)[\s\S]*?(\w+)\s*\(([^)]*)\)\s*:\s*([^{\n]+)"#,
    )
    .expect("route handler pattern is valid")
});

static LAZY_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*\(\s*\)\s*=>\s*(\w+)").expect("lazy reference pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub name: String,
    /// Byte offset of the class name
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: String,
    pub return_type: String,
    /// Byte offset of the method name
    pub offset: usize,
}

impl MethodSignature {
    pub fn docs(&self) -> String {
        signature_docs(&self.params, &self.return_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch {
    /// The full decorator run preceding the declaration, as written
    pub decorator_text: String,
    pub decorators: Vec<String>,
    pub name: String,
    /// Byte offset of `name` within the matched statement
    pub name_offset: usize,
    pub declared_type: String,
}

pub fn find_class_headers(text: &str) -> Vec<ClassHeader> {
    CLASS_HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            Some(ClassHeader {
                name: name.as_str().to_string(),
                offset: name.start(),
            })
        })
        .collect()
}

pub fn find_method_signatures(text: &str) -> Vec<MethodSignature> {
    METHOD_SIGNATURE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            Some(MethodSignature {
                name: name.as_str().to_string(),
                params: caps.get(2)?.as_str().to_string(),
                return_type: caps.get(3)?.as_str().trim().to_string(),
                offset: name.start(),
            })
        })
        .collect()
}

/// Match one reconstructed statement buffer against the property shape.
pub fn match_property(statement: &str) -> Option<PropertyMatch> {
    let caps = PROPERTY.captures(statement)?;
    let decorator_text = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
    let decorators = decorator_names(&decorator_text);
    let name = caps.get(2)?;

    Some(PropertyMatch {
        decorator_text,
        decorators,
        name: name.as_str().to_string(),
        name_offset: name.start(),
        declared_type: caps.get(3)?.as_str().trim().to_string(),
    })
}

/// Every `@Name` in a decorator run, in order, duplicates kept.
pub fn decorator_names(decorator_text: &str) -> Vec<String> {
    DECORATOR_NAME
        .captures_iter(decorator_text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Route handlers anywhere in the file. The decorator binds to the nearest
/// following method signature, even across unrelated statements.
pub fn find_route_handlers(text: &str) -> Vec<APIFunctionInfo> {
    ROUTE_HANDLER
        .captures_iter(text)
        .filter_map(|caps| {
            let method = HttpMethod::from_decorator(caps.get(1)?.as_str())?;
            let params = caps.get(4)?.as_str();
            let return_type = caps.get(5)?.as_str().trim();

            Some(APIFunctionInfo {
                name: caps.get(3)?.as_str().to_string(),
                method,
                route: caps.get(2)?.as_str().to_string(),
                docs: signature_docs(params, return_type),
                return_type: return_type.to_string(),
            })
        })
        .collect()
}

/// Class named by the first `(() => Target` in a statement buffer.
pub fn find_relationship_target(statement: &str) -> Option<String> {
    LAZY_REFERENCE
        .captures(statement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
