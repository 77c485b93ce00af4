//! Document-model extraction through an external parser process.
//!
//! Mongoose schemas are declared as runtime values rather than decorated
//! classes, so the project is handed to a TypeScript program that prints a
//! metadata document on stdout. That program only reports `entities` and
//! `relationships`; missing lists decode as empty.

use super::manifest::manifest_mentions;
use super::{Backend, BackendKind};
use crate::config::{DelegateConfig, EntitymapConfig};
use crate::core::{Error, ExtractionReport, ProjectMetadata, Result};
use crate::observability::{set_phase, ExtractionPhase};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, info_span};

/// Overrides the default script location when no config value is set.
pub const SCRIPT_ENV_VAR: &str = "ENTITYMAP_DELEGATE_SCRIPT";

/// Default script location, relative to the directory holding the executable.
const DEFAULT_SCRIPT: &str = "../src/scripts/interface-parser.ts";

#[derive(Debug, Clone, Copy, Default)]
pub struct DelegateBackend;

impl Backend for DelegateBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mongoose
    }

    fn supports(&self, root: &Path) -> bool {
        manifest_mentions(root, "mongoose")
    }

    fn extract(&self, root: &Path, config: &EntitymapConfig) -> Result<ExtractionReport> {
        let script = resolve_script(&config.delegate)?;
        let metadata = run_parser(&config.delegate, &script, root)?;
        Ok(ExtractionReport::from_metadata(metadata))
    }
}

/// Locate the parser script: config, then environment, then next to the
/// executable. The result must exist.
pub fn resolve_script(config: &DelegateConfig) -> Result<PathBuf> {
    let candidate = match &config.script {
        Some(script) => absolutize(script)?,
        None => match std::env::var_os(SCRIPT_ENV_VAR) {
            Some(script) => absolutize(Path::new(&script))?,
            None => default_script_location()?,
        },
    };

    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(Error::DelegateScriptMissing { path: candidate })
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn default_script_location() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_SCRIPT))
}

/// Run the parser with the project root as working directory and decode its
/// stdout. Any failure discards the whole run.
pub fn run_parser(config: &DelegateConfig, script: &Path, root: &Path) -> Result<ProjectMetadata> {
    let span = info_span!("delegate", program = %config.program, script = %script.display());
    let _enter = span.enter();
    let _phase = set_phase(ExtractionPhase::Delegation);

    info!("Running external parser");
    let output = Command::new(&config.program)
        .args(&config.args)
        .arg(script)
        .current_dir(root)
        .env("TS_NODE_TRANSPILE_ONLY", "true")
        .output()
        .map_err(|e| Error::Io(e).with_context("Failed to execute interface parser"))?;

    if !output.status.success() {
        return Err(Error::DelegateFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    debug!("Parser wrote {} bytes", output.stdout.len());
    serde_json::from_slice(&output.stdout).map_err(Error::DelegateOutput)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::RelationshipKind;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn shell_config(script: &Path) -> DelegateConfig {
        DelegateConfig {
            program: "sh".to_string(),
            args: Vec::new(),
            script: Some(script.to_path_buf()),
        }
    }

    fn setup(script_body: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"dependencies":{"mongoose":"^8"}}"#)
            .unwrap();
        let script = dir.path().join("parser.sh");
        fs::write(&script, script_body).unwrap();
        (dir, script)
    }

    #[test]
    fn test_decodes_partial_document() {
        let (dir, script) = setup(indoc! {r#"
            test -f package.json || exit 7
            [ "$TS_NODE_TRANSPILE_ONLY" = true ] || exit 8
            printf '%s' '{"entities":[{"name":"User","filePath":"/src/user.ts","docs":"Mongoose schema","methods":[],"properties":[{"name":"posts","type":"ObjectId[]","decorators":[]}]}],"relationships":[{"from":"User","to":"Post","type":"RefArray"}]}'
        "#});

        let metadata = run_parser(&shell_config(&script), &script, dir.path()).unwrap();

        assert_eq!(metadata.entities[0].name, "User");
        assert_eq!(metadata.entities[0].properties[0].declared_type, "ObjectId[]");
        assert!(metadata.classes.is_empty());
        assert!(metadata.functions.is_empty());
        assert_eq!(metadata.relationships[0].kind, RelationshipKind::RefArray);
    }

    #[test]
    fn test_non_zero_exit_is_fatal() {
        let (dir, script) = setup("echo 'Cannot find module ts-node' >&2\nexit 3\n");

        let err = run_parser(&shell_config(&script), &script, dir.path()).unwrap_err();
        match err {
            Error::DelegateFailed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "Cannot find module ts-node");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_garbage_output_is_fatal() {
        let (dir, script) = setup("echo 'Parsing 3 files...'\n");
        let err = run_parser(&shell_config(&script), &script, dir.path()).unwrap_err();
        assert!(matches!(err, Error::DelegateOutput(_)));
    }

    #[test]
    fn test_missing_script() {
        let dir = TempDir::new().unwrap();
        let config = shell_config(&dir.path().join("absent.ts"));

        let err = resolve_script(&config).unwrap_err();
        assert!(err.to_string().starts_with("AST parser script not found at"));
    }

    #[test]
    fn test_extract_through_backend() {
        let (dir, script) = setup("printf '%s' '{\"entities\":[],\"relationships\":[]}'\n");
        let config = EntitymapConfig {
            delegate: shell_config(&script),
            ..Default::default()
        };

        assert!(DelegateBackend.supports(dir.path()));
        let report = DelegateBackend.extract(dir.path(), &config).unwrap();
        assert!(report.metadata.is_empty());
    }
}
