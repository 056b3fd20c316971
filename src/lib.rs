/// Resource Resolver
///
/// An offline resolver for qualified resource tables: reference chasing,
/// qualifier-based variant selection, style/theme cascades, and binary typed
/// value conversion.
pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod res;

pub use engine::{AttributeSet, ResolutionEngine, ThemeRegistry, TypedValue};
pub use error::{Error, Result};
pub use res::{ResName, ResType, ResourceLoader, TypedResource};
