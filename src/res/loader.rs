use crate::res::bunch::ResBunch;
use crate::res::index::ResourceIndex;
use crate::res::res_name::ResName;
use crate::res::typed_resource::TypedResource;
use std::collections::HashMap;
use tracing::debug;

/// Immutable resource tables: per-name qualifier bunches plus the id index.
///
/// Built once by [`ResourceTableBuilder`] and treated as read-only for the
/// rest of the run, so concurrent lookups need no locking.
#[derive(Debug, Default)]
pub struct ResourceLoader {
    entries: HashMap<ResName, ResBunch>,
    index: ResourceIndex,
}

impl ResourceLoader {
    pub fn builder() -> ResourceTableBuilder {
        ResourceTableBuilder::new()
    }

    /// Select the best-matching variant for `res_name` under the requested
    /// qualifier context. Absent is not the same as "resolved to null":
    /// callers must distinguish missing names from `@null` values.
    pub fn get_value(&self, res_name: &ResName, qualifiers: &str) -> Option<TypedResource> {
        let picked = self.entries.get(res_name)?.pick(qualifiers).cloned();
        if picked.is_none() {
            debug!(name = %res_name.full_name(), qualifiers, "no variant matches context");
        }
        picked
    }

    pub fn get_value_by_id(&self, res_id: i32, qualifiers: &str) -> Option<TypedResource> {
        let res_name = self.index.res_name(res_id)?;
        self.get_value(res_name, qualifiers)
    }

    /// Existence check without resolution.
    pub fn has_value(&self, res_name: &ResName, qualifiers: &str) -> bool {
        self.get_value(res_name, qualifiers).is_some()
    }

    pub fn resource_index(&self) -> &ResourceIndex {
        &self.index
    }
}

/// Assembles the immutable tables from pre-parsed entries. Stands in for the
/// out-of-scope XML ingestion: upstream supplies, per qualified name, a
/// sequence of (qualifier-string, raw entry) pairs.
#[derive(Debug, Default)]
pub struct ResourceTableBuilder {
    entries: HashMap<ResName, ResBunch>,
    index: ResourceIndex,
    next_ids: HashMap<String, i32>,
}

impl ResourceTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant for `res_name`, assigning a fresh id the first time the
    /// name is seen. Returns the name's id.
    pub fn add(&mut self, res_name: ResName, value: TypedResource) -> i32 {
        let res_id = match self.index.resource_id(&res_name) {
            Some(existing) => existing,
            None => {
                let id = self.next_id(&res_name.package_name);
                self.index.add(res_name.clone(), id);
                id
            }
        };
        self.entries.entry(res_name).or_default().add(value);
        res_id
    }

    /// Add a variant under a caller-chosen id (e.g. ids mirroring a compiled
    /// R table). The id must be stable across calls for the same name.
    pub fn add_with_id(&mut self, res_name: ResName, res_id: i32, value: TypedResource) {
        if self.index.resource_id(&res_name).is_none() {
            self.index.add(res_name.clone(), res_id);
        }
        self.entries.entry(res_name).or_default().add(value);
    }

    pub fn build(self) -> ResourceLoader {
        ResourceLoader {
            entries: self.entries,
            index: self.index,
        }
    }

    fn next_id(&mut self, package_name: &str) -> i32 {
        // Framework package gets the platform's 0x01 prefix, apps get 0x7f.
        let package_byte = if package_name == "android" { 0x01 } else { 0x7f };
        let counter = self
            .next_ids
            .entry(package_name.to_string())
            .or_insert(0x0001_0001);
        let id = (package_byte << 24) | *counter;
        *counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::res::res_type::ResType;
    use pretty_assertions::assert_eq;

    fn loader_with_color() -> ResourceLoader {
        let mut builder = ResourceLoader::builder();
        builder.add(
            ResName::new("com.example", "color", "foo"),
            TypedResource::inline("#00FF00FF", ResType::Color, ""),
        );
        builder.build()
    }

    #[test]
    fn test_get_value_picks_default_variant() {
        let loader = loader_with_color();
        let value = loader
            .get_value(&ResName::new("com.example", "color", "foo"), "")
            .unwrap();
        assert_eq!(value.as_str(), Some("#00FF00FF"));
        assert_eq!(value.res_type(), ResType::Color);
    }

    #[test]
    fn test_has_value() {
        let loader = loader_with_color();
        assert!(loader.has_value(&ResName::new("com.example", "color", "foo"), ""));
        assert!(!loader.has_value(&ResName::new("com.example", "color", "bar"), ""));
    }

    #[test]
    fn test_ids_are_stable_per_name() {
        let mut builder = ResourceLoader::builder();
        let res_name = ResName::new("com.example", "string", "greeting");
        let first = builder.add(
            res_name.clone(),
            TypedResource::inline("hello", ResType::CharSequence, ""),
        );
        let second = builder.add(
            res_name.clone(),
            TypedResource::inline("bonjour", ResType::CharSequence, "fr"),
        );
        assert_eq!(first, second);

        let loader = builder.build();
        assert_eq!(loader.resource_index().resource_id(&res_name), Some(first));
        assert_eq!(
            loader.get_value_by_id(first, "-fr-").unwrap().as_str(),
            Some("bonjour")
        );
    }

    #[test]
    fn test_framework_ids_use_system_prefix() {
        let mut builder = ResourceLoader::builder();
        let id = builder.add(
            ResName::new("android", "color", "black"),
            TypedResource::inline("#ff000000", ResType::Color, ""),
        );
        assert!(crate::res::index::is_framework_id(id));
    }
}
