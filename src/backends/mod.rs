//! Framework backends and first-match dispatch.
//!
//! Each backend knows how to recognise a project that uses its framework and
//! how to extract metadata from it. Backends are tried in a fixed priority
//! order; the first one whose predicate holds is used.

pub mod decorator;
pub mod delegate;
pub mod manifest;
pub mod prisma;

use crate::config::EntitymapConfig;
use crate::core::{Error, ExtractionReport, Result};
use crate::observability::{set_phase, ExtractionPhase};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, info_span};

pub use decorator::DecoratorBackend;
pub use delegate::DelegateBackend;
pub use prisma::PrismaBackend;

pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;
    /// Cheap check against the project root; must not fail.
    fn supports(&self, root: &Path) -> bool;
    fn extract(&self, root: &Path, config: &EntitymapConfig) -> Result<ExtractionReport>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    TypeOrm,
    Sequelize,
    Mongoose,
    Prisma,
}

impl BackendKind {
    /// Selection order.
    pub const PRIORITY: [BackendKind; 4] = [
        BackendKind::TypeOrm,
        BackendKind::Sequelize,
        BackendKind::Mongoose,
        BackendKind::Prisma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeOrm => "typeorm",
            Self::Sequelize => "sequelize",
            Self::Mongoose => "mongoose",
            Self::Prisma => "prisma",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownBackend(s.to_string()))
    }
}

pub fn get_backend(kind: BackendKind) -> Box<dyn Backend> {
    match kind {
        BackendKind::TypeOrm => Box::new(DecoratorBackend::typeorm()),
        BackendKind::Sequelize => Box::new(DecoratorBackend::sequelize()),
        BackendKind::Mongoose => Box::new(DelegateBackend),
        BackendKind::Prisma => Box::new(PrismaBackend),
    }
}

/// Try every backend's predicate in priority order.
pub fn select_backend(root: &Path) -> Result<Box<dyn Backend>> {
    let span = info_span!("select_backend", root = %root.display());
    let _enter = span.enter();
    let _phase = set_phase(ExtractionPhase::BackendSelection);

    for kind in BackendKind::PRIORITY {
        let backend = get_backend(kind);
        if backend.supports(root) {
            debug!("{} backend matched", kind);
            return Ok(backend);
        }
        debug!("{} backend did not match", kind);
    }

    Err(Error::NoSupportedBackend {
        path: root.to_path_buf(),
    })
}

/// Extract metadata from `root` with the forced backend, or the first one
/// that recognises the project.
pub fn extract_project(
    root: &Path,
    config: &EntitymapConfig,
    forced: Option<BackendKind>,
) -> Result<ExtractionReport> {
    if !root.is_dir() {
        return Err(Error::ProjectNotFound {
            path: root.to_path_buf(),
        });
    }

    let backend = match forced {
        Some(kind) => {
            info!("Using {} backend (forced)", kind);
            get_backend(kind)
        }
        None => {
            let backend = select_backend(root)?;
            info!("Using {} backend", backend.kind());
            backend
        }
    };

    backend.extract(root, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_manifest(manifest: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), manifest).unwrap();
        dir
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("typeorm".parse::<BackendKind>().unwrap(), BackendKind::TypeOrm);
        assert_eq!("Mongoose".parse::<BackendKind>().unwrap(), BackendKind::Mongoose);

        let err = "django".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownBackend(name) if name == "django"));
    }

    #[test]
    fn test_typeorm_wins_over_mongoose() {
        let dir = project_with_manifest(r#"{"dependencies":{"mongoose":"^7","typeorm":"^0.3"}}"#);
        let backend = select_backend(dir.path()).unwrap();
        assert_eq!(backend.kind(), BackendKind::TypeOrm);
    }

    #[test]
    fn test_sequelize_selected() {
        let dir = project_with_manifest(r#"{"dependencies":{"sequelize-typescript":"^2"}}"#);
        assert_eq!(
            select_backend(dir.path()).unwrap().kind(),
            BackendKind::Sequelize
        );
    }

    #[test]
    fn test_prisma_selected_without_manifest_match() {
        let dir = project_with_manifest(r#"{"dependencies":{"express":"^4"}}"#);
        fs::create_dir(dir.path().join("prisma")).unwrap();
        fs::write(dir.path().join("prisma/schema.prisma"), "model User {}").unwrap();

        assert_eq!(select_backend(dir.path()).unwrap().kind(), BackendKind::Prisma);
    }

    #[test]
    fn test_no_backend_matches() {
        let dir = project_with_manifest(r#"{"dependencies":{"express":"^4"}}"#);
        let err = select_backend(dir.path()).err().unwrap();
        assert!(matches!(err, Error::NoSupportedBackend { .. }));
    }

    #[test]
    fn test_extract_project_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = extract_project(&missing, &EntitymapConfig::default(), None).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }

    #[test]
    fn test_forced_backend_skips_predicates() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("user.ts"),
            "@Entity()\nexport class User {\n  id: number;\n}\n",
        )
        .unwrap();

        let report = extract_project(
            dir.path(),
            &EntitymapConfig::default(),
            Some(BackendKind::TypeOrm),
        )
        .unwrap();
        assert_eq!(report.metadata.entities[0].name, "User");
    }
}
