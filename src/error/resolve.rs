use thiserror::Error;

/// Identity-level resolution failures. These are surfaced to the caller;
/// circular references and conversion parse failures are handled locally and
/// never reach this enum.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Unable to find resource ID #0x{id:08x} in packages {packages:?}")]
    IdNotFound { id: i32, packages: Vec<String> },

    #[error("unknown resource {name}")]
    NotFound { name: String },

    #[error("couldn't resolve {name} from {context} (qualifiers {qualifiers:?})")]
    Unresolved {
        name: String,
        context: String,
        qualifiers: String,
    },

    #[error("no theme {handle} found in registry")]
    NoSuchTheme { handle: i64 },
}

impl ResolveError {
    pub fn id_not_found(id: i32, packages: Vec<String>) -> Self {
        Self::IdNotFound { id, packages }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn unresolved(
        name: impl Into<String>,
        context: impl Into<String>,
        qualifiers: impl Into<String>,
    ) -> Self {
        Self::Unresolved {
            name: name.into(),
            context: context.into(),
            qualifiers: qualifiers.into(),
        }
    }
}
