//! YAML style attributes for flick toggles.

mod attributes;
mod error;

pub use attributes::{parse_attributes, parse_sheet, FlickAttributes};
pub use error::ParseError;
