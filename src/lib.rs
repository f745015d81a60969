//! Course grades computed from a student roster, an assignment catalog and
//! per-assignment submission records.

pub mod checks;
pub mod config;
pub mod display;
pub mod error;
pub mod grades;
pub mod loaders;
pub mod model;
pub mod stats;

pub use crate::config::Config;
pub use crate::error::GradeError;
pub use crate::grades::Gradebook;
pub use crate::loaders::Loader;
