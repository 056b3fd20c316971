use crate::res::res_name::ResName;
use std::collections::{BTreeSet, HashMap};

/// Framework (system) resource ids carry 0x01 in the package byte.
pub fn is_framework_id(res_id: i32) -> bool {
    (res_id >> 24) & 0xff == 0x01
}

/// Bidirectional mapping between resource ids and qualified names.
/// Pure lookup table; resolution logic lives elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    by_id: HashMap<i32, ResName>,
    by_name: HashMap<ResName, i32>,
    packages: BTreeSet<String>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, res_name: ResName, res_id: i32) {
        self.packages.insert(res_name.package_name.clone());
        self.by_id.insert(res_id, res_name.clone());
        self.by_name.insert(res_name, res_id);
    }

    pub fn res_name(&self, res_id: i32) -> Option<&ResName> {
        self.by_id.get(&res_id)
    }

    pub fn resource_id(&self, res_name: &ResName) -> Option<i32> {
        self.by_name.get(res_name).copied()
    }

    /// Package names present in the index, sorted; used in not-found messages.
    pub fn packages(&self) -> Vec<String> {
        self.packages.iter().cloned().collect()
    }
}
