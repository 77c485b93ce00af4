//! Configuration for entitymap.
//!
//! Settings come from an optional `.entitymap.toml` at the project root (or a
//! file named with `--config`); command-line flags override them.

mod core;
mod loader;

pub use self::core::{AttachmentScope, DelegateConfig, EntitymapConfig, ExtractionConfig, ScanConfig};
pub use loader::{load_config, load_config_file, parse_and_validate_config, CONFIG_FILE_NAME};
