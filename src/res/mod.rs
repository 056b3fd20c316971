pub mod attr_data;
pub mod attribute;
pub mod bunch;
pub mod index;
pub mod loader;
pub mod qualifiers;
pub mod res_name;
pub mod res_type;
pub mod style;
pub mod typed_resource;

pub use attr_data::{AttrData, AttrPair};
pub use attribute::AttributeResource;
pub use bunch::ResBunch;
pub use index::ResourceIndex;
pub use loader::{ResourceLoader, ResourceTableBuilder};
pub use res_name::ResName;
pub use res_type::ResType;
pub use style::{EmptyStyle, Style, StyleChain, StyleData, StyleResolver, ThemeStyleSet};
pub use typed_resource::{ResData, TypedResource};
