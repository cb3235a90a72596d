//! Secret source adapters

mod file_source;

pub use file_source::{FileFormat, FileSecretSource, parse_json, parse_json_lines, parse_toml};
