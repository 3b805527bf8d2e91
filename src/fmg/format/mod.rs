//! File format layer for FMG containers.
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Fixed Header   │ ← header::parse() / header::write()
//! ├─────────────────┤
//! │ Chunk Directory │ ← directory::read() / directory::plan()
//! │ (12-byte rows)  │
//! ├─────────────────┤
//! │  Offset Table   │   u32 per id, 0 = empty text
//! ├─────────────────┤
//! │  String Blob    │   UTF-16LE, null-terminated, back-to-back
//! └─────────────────┘
//! ```
//!
//! [`text`] holds the newline escaping applied between the blob and the
//! single-line editing surface.

pub mod directory;
pub mod header;
pub mod text;
