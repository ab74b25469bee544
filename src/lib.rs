//! A crate that compiles the Unicode and IANA reference tables used for IDNA
//! (RFC 5891) validation into compact, range-encoded Rust tables: script
//! membership, Arabic joining types, and IDNA code point property classes.

pub mod config;
pub mod data_file;
pub mod emit;
pub mod error;
pub mod idna_tables;
pub mod joining_types;
pub mod logging;
pub mod pipeline;
pub mod ranges;
pub mod scripts;
pub mod source;
pub mod types;
