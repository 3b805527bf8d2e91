//! # fmg-editor
//!
//! Reader and writer for FMG files: sparse, id-indexed tables of UTF-16
//! strings used by game localization pipelines.
//!
//! [`read_file`] decodes a file into an ordered id → text mapping with line
//! feeds escaped; [`write_file`] rewrites a file from such a mapping.
pub mod fmg;

// Re-export the main types for convenience
pub use fmg::{
    decode, encode, read_file, read_file_with, read_header, write_file, write_file_with, FmgError, FmgReader,
    Result,
    lines::{export_lines, import_lines},
    types::{
        models::{Chunk, Entries, FmgHeader, IntKind},
        options::{ReadOptions, WriteOptions},
    },
};
