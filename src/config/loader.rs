use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::core::EntitymapConfig;
use crate::core::{Error, Result};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = ".entitymap.toml";

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<EntitymapConfig, String> {
    let config = toml::from_str::<EntitymapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if config.scan.extensions.is_empty() {
        return Err("scan.extensions must name at least one extension".to_string());
    }

    if let Some(bad) = config
        .scan
        .ignore
        .iter()
        .find(|pattern| glob::Pattern::new(pattern).is_err())
    {
        return Err(format!("scan.ignore contains an invalid glob: {bad}"));
    }

    if config.delegate.program.trim().is_empty() {
        return Err("delegate.program must not be empty".to_string());
    }

    Ok(config)
}

/// Try loading config from a specific path; missing or broken files yield `None`
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<EntitymapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Load a config file the user named explicitly; every failure is fatal.
pub fn load_config_file(path: &Path) -> Result<EntitymapConfig> {
    let contents = read_config_file(path).map_err(|e| Error::io_at(path, e))?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}

/// Load `.entitymap.toml` from the project root, falling back to defaults.
pub fn load_config(project_root: &Path) -> EntitymapConfig {
    try_load_config_from_path(&project_root.join(CONFIG_FILE_NAME)).unwrap_or_else(|| {
        tracing::debug!(
            "No usable {} in {}. Using default config.",
            CONFIG_FILE_NAME,
            project_root.display()
        );
        EntitymapConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttachmentScope;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [scan]
            extensions = ["ts", "mts"]
            ignore = ["**/*.spec.ts"]
            parallel = false

            [extraction]
            scope = "file"

            [delegate]
            program = "node"
            args = ["--loader", "ts-node/esm"]
            script = "tools/interface-parser.ts"
        "#})
        .unwrap();

        assert_eq!(config.scan.extensions, vec!["ts", "mts"]);
        assert_eq!(config.scan.exclude_dirs, vec!["node_modules"]);
        assert!(!config.scan.parallel);
        assert_eq!(config.extraction.scope, AttachmentScope::File);
        assert_eq!(config.delegate.program, "node");
        assert_eq!(
            config.delegate.script.as_deref(),
            Some(Path::new("tools/interface-parser.ts"))
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, EntitymapConfig::default());
        assert_eq!(config.extraction.scope, AttachmentScope::Body);
    }

    #[test]
    fn test_rejects_unknown_scope() {
        let err = parse_and_validate_config("[extraction]\nscope = \"module\"\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_rejects_invalid_ignore_glob() {
        let err = parse_and_validate_config("[scan]\nignore = [\"src/[\"]\n").unwrap_err();
        assert!(err.contains("invalid glob"));
    }

    #[test]
    fn test_load_config_falls_back_on_broken_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[scan\nbroken").unwrap();

        assert_eq!(load_config(dir.path()), EntitymapConfig::default());
    }

    #[test]
    fn test_load_config_file_reports_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");

        assert!(matches!(
            load_config_file(&path),
            Err(Error::FileSystem { .. })
        ));

        fs::write(&path, "[extraction]\nscope = 3\n").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(Error::Configuration(_))
        ));
    }
}
