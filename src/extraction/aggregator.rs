//! Per-file classification and project-wide aggregation.
//!
//! `extract_file` turns one file's text into a self-contained
//! [`FileExtraction`]; [`MetadataAggregator`] folds those into the project
//! document one whole file at a time, so relationship edges can never be
//! separated from the classes they were found with.

use super::patterns::{
    find_class_headers, find_method_signatures, find_relationship_target, find_route_handlers,
    match_property, MethodSignature, PropertyMatch,
};
use super::profile::DecoratorProfile;
use super::scope::{LineIndex, ScopeMap};
use super::statements::{reconstruct_statements, Statement};
use crate::config::AttachmentScope;
use crate::core::{
    APIFunctionInfo, ClassInfo, ExtractionWarning, MethodInfo, ProjectMetadata, PropertyInfo,
    RelationshipInfo,
};
use crate::io::display_path;
use std::path::{Path, PathBuf};

const WARNING_EXCERPT_CHARS: usize = 120;

/// Everything found in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileExtraction {
    pub path: PathBuf,
    /// Decided once per file from the profile's entity marker
    pub is_entity_file: bool,
    pub classes: Vec<ClassInfo>,
    pub functions: Vec<APIFunctionInfo>,
    pub relationships: Vec<RelationshipInfo>,
    pub warnings: Vec<ExtractionWarning>,
}

impl FileExtraction {
    /// An unreadable file contributes nothing but a warning.
    pub fn unreadable(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            warnings: vec![ExtractionWarning::UnreadableFile {
                path: path.clone(),
                message: message.into(),
            }],
            path,
            ..Default::default()
        }
    }
}

/// A flushed statement buffer together with its property match, if any.
struct ParsedStatement {
    statement: Statement,
    property: PropertyMatch,
    target: Option<String>,
}

pub fn extract_file(
    relative: &Path,
    text: &str,
    profile: &DecoratorProfile,
    scope: AttachmentScope,
) -> FileExtraction {
    let file_path = display_path(relative);
    let headers = find_class_headers(text);
    let methods = find_method_signatures(text);
    let mut warnings = Vec::new();

    let parsed: Vec<ParsedStatement> = reconstruct_statements(text)
        .into_iter()
        .filter_map(|statement| match match_property(&statement.text) {
            Some(property) => Some(ParsedStatement {
                target: find_relationship_target(&statement.text),
                statement,
                property,
            }),
            None => {
                warnings.push(ExtractionWarning::UnmatchedStatement {
                    path: relative.to_path_buf(),
                    line: statement.line,
                    text: excerpt(&statement.text),
                });
                None
            }
        })
        .collect();

    let mut classes: Vec<ClassInfo> = headers
        .iter()
        .map(|header| ClassInfo::new(header.name.clone(), file_path.clone()))
        .collect();
    let mut relationships = Vec::new();

    match scope {
        AttachmentScope::File => {
            attach_file_scoped(&mut classes, &methods, &parsed, profile, &mut relationships)
        }
        AttachmentScope::Body => {
            let scope_map = ScopeMap::build(text, &headers);
            let lines = LineIndex::new(text);
            let unattached = attach_body_scoped(
                &mut classes,
                &methods,
                &parsed,
                profile,
                &scope_map,
                &lines,
                &mut relationships,
            );
            warnings.extend(
                unattached
                    .into_iter()
                    .map(|(line, name)| ExtractionWarning::UnattachedStatement {
                        path: relative.to_path_buf(),
                        line,
                        name,
                    }),
            );
        }
    }

    FileExtraction {
        path: relative.to_path_buf(),
        is_entity_file: profile.is_entity_file(text),
        classes,
        functions: find_route_handlers(text),
        relationships,
        warnings,
    }
}

/// Legacy association: every member in the file belongs to every class.
fn attach_file_scoped(
    classes: &mut [ClassInfo],
    methods: &[MethodSignature],
    parsed: &[ParsedStatement],
    profile: &DecoratorProfile,
    relationships: &mut Vec<RelationshipInfo>,
) {
    for class in classes.iter_mut() {
        class.methods = methods.iter().map(method_info).collect();
        for entry in parsed {
            class.properties.push(property_info(&entry.property));
            relationships.extend(relationship_edges(&class.name, entry, profile));
        }
    }
}

/// Returns `(line, name)` of every property that no class body contains.
fn attach_body_scoped(
    classes: &mut [ClassInfo],
    methods: &[MethodSignature],
    parsed: &[ParsedStatement],
    profile: &DecoratorProfile,
    scope_map: &ScopeMap,
    lines: &LineIndex,
    relationships: &mut Vec<RelationshipInfo>,
) -> Vec<(usize, String)> {
    for method in methods {
        if let Some(owner) = scope_map.owner_of_line(lines.line_of(method.offset)) {
            classes[owner].methods.push(method_info(method));
        }
    }

    let mut unattached = Vec::new();
    for entry in parsed {
        // The line carrying the property name; initializers may open deeper blocks
        let line = entry.statement.line_at(entry.property.name_offset);
        let Some(owner) = scope_map.owner_of_line(line) else {
            unattached.push((line, entry.property.name.clone()));
            continue;
        };
        let class = &mut classes[owner];
        class.properties.push(property_info(&entry.property));
        relationships.extend(relationship_edges(&class.name, entry, profile));
    }
    unattached
}

fn method_info(signature: &MethodSignature) -> MethodInfo {
    MethodInfo::new(
        signature.name.clone(),
        &signature.params,
        &signature.return_type,
    )
}

fn property_info(property: &PropertyMatch) -> PropertyInfo {
    PropertyInfo {
        name: property.name.clone(),
        declared_type: property.declared_type.clone(),
        decorators: property.decorators.clone(),
    }
}

/// One edge per relationship decorator; all share the statement's lazy target.
fn relationship_edges(
    from: &str,
    entry: &ParsedStatement,
    profile: &DecoratorProfile,
) -> Vec<RelationshipInfo> {
    let Some(target) = &entry.target else {
        return Vec::new();
    };

    entry
        .property
        .decorators
        .iter()
        .filter_map(|decorator| profile.relationship_kind(decorator))
        .map(|kind| RelationshipInfo {
            from: from.to_string(),
            to: target.clone(),
            kind,
        })
        .collect()
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= WARNING_EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let kept: String = trimmed.chars().take(WARNING_EXCERPT_CHARS).collect();
        format!("{kept}...")
    }
}

/// Accumulates per-file results into the project document.
#[derive(Debug, Default)]
pub struct MetadataAggregator {
    metadata: ProjectMetadata,
    warnings: Vec<ExtractionWarning>,
    files: usize,
}

impl MetadataAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's results as a unit.
    pub fn merge(&mut self, file: FileExtraction) {
        self.files += 1;
        self.metadata.functions.extend(file.functions);

        if file.is_entity_file {
            self.metadata.entities.extend(file.classes);
            self.metadata.relationships.extend(file.relationships);
        } else {
            self.metadata.classes.extend(file.classes);
        }

        self.warnings.extend(file.warnings);
    }

    pub fn files_merged(&self) -> usize {
        self.files
    }

    pub fn finish(self) -> (ProjectMetadata, Vec<ExtractionWarning>) {
        (self.metadata, self.warnings)
    }
}
