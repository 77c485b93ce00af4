use super::{Backend, BackendKind};
use crate::config::EntitymapConfig;
use crate::core::{ExtractionReport, ProjectMetadata, Result};
use std::path::Path;
use tracing::warn;

pub const SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Recognises Prisma projects. Schema parsing is not implemented, so the
/// document is always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismaBackend;

impl Backend for PrismaBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Prisma
    }

    fn supports(&self, root: &Path) -> bool {
        root.join(SCHEMA_PATH).is_file()
    }

    fn extract(&self, root: &Path, _config: &EntitymapConfig) -> Result<ExtractionReport> {
        warn!(
            "Prisma schema at {} is not parsed; emitting an empty document",
            root.join(SCHEMA_PATH).display()
        );
        Ok(ExtractionReport::from_metadata(ProjectMetadata::default()))
    }
}
