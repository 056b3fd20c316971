use crate::error::ResolveError;
use crate::res::style::{StyleChain, ThemeStyleSet};
use std::collections::HashMap;
use std::sync::Mutex;

/// Owns the mapping from opaque theme handles to their style stacks.
///
/// The loaded resource tables are immutable; this is the one mutable shared
/// structure, so every access goes through a single mutex. Handles start at
/// 1000 and only grow, so a released handle is never reused within a run.
#[derive(Debug)]
pub struct ThemeRegistry {
    inner: Mutex<ThemeTable>,
}

#[derive(Debug)]
struct ThemeTable {
    next_handle: i64,
    themes: HashMap<i64, ThemeStyleSet>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ThemeTable {
                next_handle: 1000,
                themes: HashMap::new(),
            }),
        }
    }

    /// Allocate an empty theme and return its handle.
    pub fn create(&self) -> i64 {
        let mut table = self.inner.lock().expect("theme registry poisoned");
        let handle = table.next_handle;
        table.next_handle += 1;
        table.themes.insert(handle, ThemeStyleSet::new());
        handle
    }

    pub fn release(&self, handle: i64) {
        let mut table = self.inner.lock().expect("theme registry poisoned");
        table.themes.remove(&handle);
    }

    pub fn apply(&self, handle: i64, chain: StyleChain, force: bool) -> Result<(), ResolveError> {
        let mut table = self.inner.lock().expect("theme registry poisoned");
        let theme = table
            .themes
            .get_mut(&handle)
            .ok_or(ResolveError::NoSuchTheme { handle })?;
        theme.apply(chain, force);
        Ok(())
    }

    /// Replace `dest`'s style stack with a copy of `source`'s.
    pub fn copy(&self, dest: i64, source: i64) -> Result<(), ResolveError> {
        let mut table = self.inner.lock().expect("theme registry poisoned");
        let copied = table
            .themes
            .get(&source)
            .ok_or(ResolveError::NoSuchTheme { handle: source })?
            .copy();
        let dest_theme = table
            .themes
            .get_mut(&dest)
            .ok_or(ResolveError::NoSuchTheme { handle: dest })?;
        *dest_theme = copied;
        Ok(())
    }

    /// Clone the theme's current style stack for lock-free resolution.
    pub fn snapshot(&self, handle: i64) -> Result<ThemeStyleSet, ResolveError> {
        let table = self.inner.lock().expect("theme registry poisoned");
        table
            .themes
            .get(&handle)
            .cloned()
            .ok_or(ResolveError::NoSuchTheme { handle })
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
