// Export modules for library usage
pub mod backends;
pub mod cli;
pub mod config;
pub mod core;
pub mod extraction;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    APIFunctionInfo, ClassInfo, Error, ExtractionReport, ExtractionWarning, HttpMethod,
    MethodInfo, ProjectMetadata, PropertyInfo, RelationshipInfo, RelationshipKind, Result,
};

pub use crate::backends::{extract_project, get_backend, select_backend, Backend, BackendKind};

pub use crate::config::{load_config, AttachmentScope, EntitymapConfig};

pub use crate::extraction::{extract_file, DecoratorProfile, ExtractionEngine};

pub use crate::io::output::{create_writer, OutputWriter};
