use std::path::Path;
use tracing::debug;

pub const MANIFEST_FILE: &str = "package.json";

/// True when the project's `package.json` mentions `needle` anywhere in its
/// raw text. A missing or unreadable manifest never matches.
pub fn manifest_mentions(root: &Path, needle: &str) -> bool {
    let path = root.join(MANIFEST_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => content.contains(needle),
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            false
        }
    }
}
