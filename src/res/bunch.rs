use crate::res::qualifiers;
use crate::res::typed_resource::TypedResource;

/// All qualifier variants loaded for one resource name.
///
/// `pick` is purely functional over the variant list: for a given requested
/// context it always selects the same variant, regardless of the order the
/// variants were added in.
#[derive(Debug, Clone, Default)]
pub struct ResBunch {
    variants: Vec<TypedResource>,
}

impl ResBunch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: TypedResource) {
        self.variants.push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Select the most specific variant compatible with the requested
    /// qualifier context, or `None` when nothing matches.
    pub fn pick(&self, context: &str) -> Option<&TypedResource> {
        self.variants
            .iter()
            .filter(|variant| qualifiers::is_compatible(variant.qualifiers(), context))
            .min_by(|a, b| qualifiers::specificity_cmp(a.qualifiers(), b.qualifiers()))
    }
}
