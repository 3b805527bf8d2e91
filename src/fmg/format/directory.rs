//! Chunk directory: the run-length compaction of sparse ids into a dense
//! offset table.
//!
//! Each 12-byte row is `u32 start_index, u32 start_id, u32 end_id`. Rows
//! appear in ascending id order with `start_index` increasing.

use std::io::{Read, Seek, Write};

use log::trace;

use crate::fmg::types::error::{FmgError, Result};
use crate::fmg::types::models::{Chunk, IntKind};
use crate::fmg::utils;

use super::header::HEADER_SIZE;

/// Size of one directory row.
pub const ROW_SIZE: u64 = 12;

fn row_offset(row: u32) -> u64 {
    HEADER_SIZE + ROW_SIZE * row as u64
}

/// Read `chunk_count` directory rows.
pub fn read<R: Read + Seek>(reader: &mut R, chunk_count: u32) -> Result<Vec<Chunk>> {
    (0..chunk_count)
        .map(|row| {
            let base = row_offset(row);
            let chunk = Chunk {
                start_index: utils::read_u32(reader, base)?,
                start_id: utils::read_u32(reader, base + 4)?,
                end_id: utils::read_u32(reader, base + 8)?,
            };
            trace!("Chunk {}: ids {}..={} at slot {}", row, chunk.start_id, chunk.end_id, chunk.start_index);
            chunk.validate(row)
        })
        .collect()
}

/// Write directory rows starting at the end of the header.
pub fn write<W: Write + Seek>(writer: &mut W, chunks: &[Chunk]) -> Result<()> {
    for (row, chunk) in chunks.iter().enumerate() {
        let base = row_offset(row as u32);
        utils::write_int(writer, IntKind::U32, base, chunk.start_index as i64)?;
        utils::write_int(writer, IntKind::U32, base + 4, chunk.start_id as i64)?;
        utils::write_int(writer, IntKind::U32, base + 8, chunk.end_id as i64)?;
    }
    Ok(())
}

/// Group ids into maximal runs of consecutive values.
///
/// Ids must already be strictly ascending; this is a single linear pass
/// and never sorts. A gap (`id > previous + 1`) closes the open chunk.
///
/// # Errors
/// `InvalidArgument` if `ids` is empty, not strictly ascending, or holds
/// more entries than a `u32` slot index can address.
pub fn plan<I: IntoIterator<Item = u32>>(ids: I) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut open: Option<Chunk> = None;
    let mut entries: u64 = 0;

    for id in ids {
        if let Some(chunk) = open.as_mut() {
            if id <= chunk.end_id {
                return Err(FmgError::InvalidArgument(format!(
                    "Ids must be strictly ascending: {} follows {}",
                    id, chunk.end_id
                )));
            }
            if id == chunk.end_id + 1 {
                chunk.end_id = id;
                entries += 1;
                continue;
            }
            chunks.push(*chunk);
        }

        let start_index = u32::try_from(entries)
            .map_err(|_| FmgError::InvalidArgument(format!("Too many entries: {}", entries)))?;
        open = Some(Chunk { start_index, start_id: id, end_id: id });
        entries += 1;
    }

    match open {
        Some(chunk) => chunks.push(chunk),
        None => return Err(FmgError::InvalidArgument("Cannot encode an empty mapping".to_string())),
    }
    Ok(chunks)
}

/// Total offset-table slots covered by `chunks`.
pub fn slot_count(chunks: &[Chunk]) -> u64 {
    chunks.iter().map(Chunk::span).sum()
}
