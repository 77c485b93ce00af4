use super::manifest::manifest_mentions;
use super::{Backend, BackendKind};
use crate::config::EntitymapConfig;
use crate::core::{ExtractionReport, Result};
use crate::extraction::{DecoratorProfile, ExtractionEngine};
use std::path::Path;

/// A backend that scans sources with the decorator engine.
#[derive(Debug, Clone)]
pub struct DecoratorBackend {
    kind: BackendKind,
    profile: DecoratorProfile,
}

impl DecoratorBackend {
    pub fn typeorm() -> Self {
        Self {
            kind: BackendKind::TypeOrm,
            profile: DecoratorProfile::TYPEORM,
        }
    }

    pub fn sequelize() -> Self {
        Self {
            kind: BackendKind::Sequelize,
            profile: DecoratorProfile::SEQUELIZE,
        }
    }

    pub fn profile(&self) -> &DecoratorProfile {
        &self.profile
    }
}

impl Backend for DecoratorBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn supports(&self, root: &Path) -> bool {
        manifest_mentions(root, self.kind.as_str())
    }

    fn extract(&self, root: &Path, config: &EntitymapConfig) -> Result<ExtractionReport> {
        ExtractionEngine::new(self.profile)
            .with_scope(config.extraction.scope)
            .with_scan_config(config.scan.clone())
            .run(root)
    }
}
