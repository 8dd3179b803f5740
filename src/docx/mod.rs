pub mod package;
pub mod parts;
pub mod xml;
