//! Core FMG codec module.
//!
//! - [`types`]: errors, models, and options
//! - [`utils`]: positioned little-endian and UTF-16 primitives
//! - [`format`]: header, chunk directory, and newline escaping
//! - [`reader`]: file bytes → ordered id → text mapping
//! - [`writer`]: ordered id → text mapping → file bytes
//! - [`lines`]: single-line text form used for export/import

pub mod format;
pub mod lines;
pub mod reader;
pub mod types;
pub mod utils;
pub mod writer;

pub use reader::{decode, read_file, read_file_with, read_header, FmgReader};
pub use types::error::{FmgError, Result};
pub use writer::{encode, write_file, write_file_with};
