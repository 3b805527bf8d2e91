//! Core data structures for FMG format components.
//!
//! - [`FmgHeader`]: the fixed-offset fields at the start of every file
//! - [`Chunk`]: one row of the chunk directory
//! - [`IntKind`]: the integer widths the primitive accessor understands
//! - [`Entries`]: the ordered id → text mapping exchanged with callers

use indexmap::IndexMap;

use super::error::{FmgError, Result};

/// Ordered mapping from entry id to (escaped) text.
///
/// Iteration order is the on-disk order. The encoder derives chunk
/// boundaries from this order and never re-sorts, so ids must be inserted
/// in strictly ascending order.
pub type Entries = IndexMap<u32, String>;

/// Parsed fixed header of an FMG file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmgHeader {
    /// Magic/version constant at 0x00. Always `0x10000` in known files.
    pub magic: u32,
    /// Total file size as stored at 0x04.
    pub file_size: u32,
    /// Format/version byte at 0x08.
    pub version: u8,
    /// Byte at 0x09. Read and carried along, never interpreted.
    pub reserved: i8,
    pub chunk_count: u32,
    /// Sum of all chunk spans, i.e. the number of offset-table slots.
    pub entry_count: u32,
    /// Absolute position of the offset table.
    pub offset_table_start: u32,
}

/// One row of the chunk directory: a maximal run of consecutive ids
/// stored contiguously in the offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Offset-table position of the slot for `start_id`.
    pub start_index: u32,
    pub start_id: u32,
    pub end_id: u32,
}

impl Chunk {
    /// Number of ids (and offset-table slots) covered by this chunk.
    pub fn span(&self) -> u64 {
        (self.end_id - self.start_id) as u64 + 1
    }

    /// Offset-table position of the slot for `id`.
    ///
    /// The caller guarantees `start_id <= id <= end_id`.
    pub fn slot_index(&self, id: u32) -> u64 {
        self.start_index as u64 + (id - self.start_id) as u64
    }

    /// Validates the `start_id <= end_id` invariant for a row read from disk.
    pub fn validate(self, row: u32) -> Result<Self> {
        if self.start_id > self.end_id {
            return Err(FmgError::InvalidFormat(format!(
                "Chunk {} has start id {} greater than end id {}",
                row, self.start_id, self.end_id
            )));
        }
        Ok(self)
    }
}

/// Fixed-width integer kinds used by the binary primitive accessor.
/// All values are little-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    I8,
    U8,
    I16,
    U32,
}

impl IntKind {
    /// Returns the encoded width in bytes.
    pub fn width(&self) -> usize {
        match self {
            IntKind::I8 | IntKind::U8 => 1,
            IntKind::I16 => 2,
            IntKind::U32 => 4,
        }
    }
}

impl std::fmt::Display for IntKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IntKind::I8 => write!(f, "int8"),
            IntKind::U8 => write!(f, "uint8"),
            IntKind::I16 => write!(f, "int16"),
            IntKind::U32 => write!(f, "uint32"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_slot_arithmetic() {
        let chunk = Chunk { start_index: 3, start_id: 7, end_id: 8 };
        assert_eq!(chunk.span(), 2);
        assert_eq!(chunk.slot_index(7), 3);
        assert_eq!(chunk.slot_index(8), 4);
    }

    #[test]
    fn inverted_chunk_is_rejected() {
        let chunk = Chunk { start_index: 0, start_id: 9, end_id: 4 };
        assert!(matches!(chunk.validate(2), Err(FmgError::InvalidFormat(_))));
    }

    #[test]
    fn int_kind_widths() {
        assert_eq!(IntKind::I8.width(), 1);
        assert_eq!(IntKind::I16.width(), 2);
        assert_eq!(IntKind::U32.width(), 4);
    }
}
