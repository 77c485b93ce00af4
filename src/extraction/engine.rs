use super::aggregator::{extract_file, FileExtraction, MetadataAggregator};
use super::profile::DecoratorProfile;
use crate::config::{AttachmentScope, ScanConfig};
use crate::core::{ExtractionReport, Result};
use crate::io::{find_project_files, Discovery};
use crate::observability::{
    increment_processed, set_current_file, set_phase, set_progress, ContextGuard,
    ExtractionPhase,
};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, info_span, warn};

/// Runs the decorator engine over a whole project tree.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    profile: DecoratorProfile,
    scope: AttachmentScope,
    scan: ScanConfig,
}

impl ExtractionEngine {
    pub fn new(profile: DecoratorProfile) -> Self {
        Self {
            profile,
            scope: AttachmentScope::default(),
            scan: ScanConfig::default(),
        }
    }

    pub fn with_scope(mut self, scope: AttachmentScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn profile(&self) -> &DecoratorProfile {
        &self.profile
    }

    pub fn run(&self, root: &Path) -> Result<ExtractionReport> {
        let span = info_span!("extract", backend = self.profile.name, root = %root.display());
        let _enter = span.enter();

        let Discovery {
            files,
            warnings: mut discovery_warnings,
        } = {
            let _phase = set_phase(ExtractionPhase::FileDiscovery);
            find_project_files(root, &self.scan)?
        };
        info!("Scanning {} source files", files.len());

        set_progress(0, files.len());

        // Results come back in enumeration order either way; merging is sequential.
        let extractions: Vec<FileExtraction> = if self.scan.parallel {
            files
                .par_iter()
                .map(|relative| self.scan_file(root, relative))
                .collect()
        } else {
            files
                .iter()
                .map(|relative| self.scan_file(root, relative))
                .collect()
        };

        let mut aggregator = MetadataAggregator::new();
        for extraction in extractions {
            aggregator.merge(extraction);
        }

        let files_scanned = aggregator.files_merged();
        let (metadata, file_warnings) = aggregator.finish();
        discovery_warnings.extend(file_warnings);
        let warnings = discovery_warnings;
        report_warnings(&warnings);

        info!(
            entities = metadata.entities.len(),
            classes = metadata.classes.len(),
            functions = metadata.functions.len(),
            relationships = metadata.relationships.len(),
            "Extraction finished"
        );

        Ok(ExtractionReport {
            metadata,
            warnings,
            files_scanned,
        })
    }

    fn scan_file(&self, root: &Path, relative: &Path) -> FileExtraction {
        let _context = file_context(relative);
        let full_path = root.join(relative);

        let extraction = match std::fs::read(&full_path) {
            Ok(bytes) => extract_file(
                relative,
                &String::from_utf8_lossy(&bytes),
                &self.profile,
                self.scope,
            ),
            Err(e) => FileExtraction::unreadable(relative.to_path_buf(), e.to_string()),
        };

        increment_processed();
        extraction
    }
}

/// Crash context for one file. Runs on rayon workers, whose thread-local
/// context starts empty, so the phase is set here rather than by the caller.
fn file_context(relative: &Path) -> (ContextGuard, ContextGuard) {
    let phase = set_phase(ExtractionPhase::Extraction);
    let file = set_current_file(relative);
    // Tuple fields drop first to last: the file guard must be undone first
    (file, phase)
}

fn report_warnings(warnings: &[crate::core::ExtractionWarning]) {
    use crate::core::ExtractionWarning;

    for warning in warnings {
        match warning {
            ExtractionWarning::UnreadableFile { .. } => warn!("{}", warning),
            ExtractionWarning::UnmatchedStatement { .. }
            | ExtractionWarning::UnattachedStatement { .. } => debug!("{}", warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_run_scans_tree_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "src/b/post.entity.ts",
            "@Entity()\nexport class Post {\n  id: number;\n}\n",
        );
        write(
            dir.path(),
            "src/a/user.entity.ts",
            "@Entity()\nexport class User {\n  id: number;\n}\n",
        );
        write(dir.path(), "src/a/user.dto.ts", "export class UserDto {}\n");

        let report = ExtractionEngine::new(DecoratorProfile::TYPEORM)
            .run(dir.path())
            .unwrap();

        let entities: Vec<_> = report
            .metadata
            .entities
            .iter()
            .map(|c| c.file_path.as_str())
            .collect();
        assert_eq!(entities, vec!["/src/a/user.entity.ts", "/src/b/post.entity.ts"]);
        assert_eq!(report.metadata.classes[0].name, "UserDto");
        assert_eq!(report.files_scanned, 3);
    }

    #[test]
    fn test_worker_threads_carry_extraction_context() {
        use crate::observability::get_current_context;

        std::thread::spawn(|| {
            assert!(get_current_context().phase.is_none());
            {
                let _context = file_context(Path::new("src/user.ts"));
                let context = get_current_context();
                assert_eq!(context.phase, Some(ExtractionPhase::Extraction));
                assert_eq!(context.current_file.as_deref(), Some(Path::new("src/user.ts")));
            }
            let restored = get_current_context();
            assert!(restored.phase.is_none());
            assert!(restored.current_file.is_none());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_parallel_and_sequential_runs_agree() {
        let dir = TempDir::new().unwrap();
        for i in 0..12 {
            write(
                dir.path(),
                &format!("src/m{i:02}.entity.ts"),
                &format!(
                    indoc! {"
                        @Entity()
                        export class M{i} {{
                          id: number;
                          @ManyToOne(() => M{j})
                          next: M{j};
                        }}
                    "},
                    i = i,
                    j = (i + 1) % 12
                ),
            );
        }

        let parallel = ExtractionEngine::new(DecoratorProfile::TYPEORM)
            .run(dir.path())
            .unwrap();
        let sequential = ExtractionEngine::new(DecoratorProfile::TYPEORM)
            .with_scan_config(ScanConfig {
                parallel: false,
                ..ScanConfig::default()
            })
            .run(dir.path())
            .unwrap();

        assert_eq!(parallel.metadata, sequential.metadata);
        assert_eq!(parallel.metadata.relationships.len(), 12);
    }
}
