pub mod extract;
pub mod fragment;
pub mod substitute;
pub mod token;
pub mod values;

pub use extract::extract_placeholders;
pub use substitute::{substitute, PartSubstitution};
pub use token::{is_valid_placeholder, normalize_placeholder};
pub use values::ValueMap;
