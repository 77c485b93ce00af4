//! Crash context and logging setup.
//!
//! ```ignore
//! use entitymap::observability::{install_panic_hook, set_phase, ExtractionPhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(ExtractionPhase::Extraction);
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, get_progress, increment_processed, set_current_file, set_phase,
    set_progress, ContextGuard, ExtractionContext, ExtractionPhase,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::init_logging;
