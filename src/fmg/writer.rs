//! Encode path: ordered id → text mapping to a complete FMG image.
//!
//! # Layout
//!
//! ```text
//! [HEADER]    0x00..0x1C, written last
//! [DIRECTORY] one 12-byte row per chunk
//! [TABLE]     one u32 per entry, absolute string offset or 0
//! [BLOB]      UTF-16LE strings with terminators, in entry order
//! [PAD]       one zero u16 if the blob ends on a half word
//! ```
//!
//! The output buffer is sized and zeroed up front, so every slot that is
//! never written (empty text) reads back as 0.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use log::{debug, info, trace};

use super::format::{directory, header, text};
use super::types::error::{FmgError, Result};
use super::types::models::{Entries, FmgHeader, IntKind};
use super::types::options::WriteOptions;
use super::utils;

/// Unescape an entry's text and attach its terminator.
///
/// Returns `None` when nothing is left after unescaping.
fn prepare_text(id: u32, raw: &str) -> Result<Option<String>> {
    let mut stored = text::unescape(raw);
    if stored.is_empty() {
        return Ok(None);
    }
    let body = stored.strip_suffix('\0').unwrap_or(&stored);
    if body.contains('\0') {
        return Err(FmgError::InvalidArgument(format!(
            "Entry {} contains an embedded U+0000 that would truncate it",
            id
        )));
    }
    if !stored.ends_with('\0') {
        stored.push('\0');
    }
    Ok(Some(stored))
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| FmgError::InvalidArgument(format!("{} {:#x} exceeds the 32-bit format limit", what, value)))
}

/// Encode `entries` into a complete FMG image.
///
/// `entries` must iterate in strictly ascending id order; chunk boundaries
/// are taken from that order as-is.
///
/// # Errors
/// `InvalidArgument` if the mapping is empty, ids are not strictly
/// ascending, a text holds an embedded U+0000, or the image would exceed
/// 4 GiB.
pub fn encode(entries: &Entries, options: WriteOptions) -> Result<Vec<u8>> {
    // Pass 1: directory plan, table position, and blob size.
    let chunks = directory::plan(entries.keys().copied())?;
    let prepared = entries
        .iter()
        .map(|(id, raw)| prepare_text(*id, raw))
        .collect::<Result<Vec<_>>>()?;

    let start_offset = header::directory_end(chunks.len() as u32);
    let blob_origin = start_offset + header::SLOT_SIZE * entries.len() as u64;
    let blob_len: u64 = prepared
        .iter()
        .flatten()
        .map(|s| 2 * s.encode_utf16().count() as u64)
        .sum();
    let blob_end = blob_origin + blob_len;
    let file_size = if blob_end % 4 == 2 { blob_end + 2 } else { blob_end };
    let file_size = to_u32(file_size, "File size")?;

    debug!(
        "Encoding {} entries in {} chunks: table at {:#x}, blob at {:#x}, {} bytes total",
        entries.len(),
        chunks.len(),
        start_offset,
        blob_origin,
        file_size
    );

    let mut out = Cursor::new(vec![0u8; file_size as usize]);
    directory::write(&mut out, &chunks)?;

    // Pass 2: offset table and blob.
    let mut text_offset = blob_origin;
    for (index, stored) in prepared.iter().enumerate() {
        let Some(stored) = stored else {
            continue;
        };
        let slot = start_offset + header::SLOT_SIZE * index as u64;
        utils::write_int(&mut out, IntKind::U32, slot, text_offset as i64)?;
        let units = utils::write_utf16_string(&mut out, text_offset, stored)?;
        trace!("Slot {:#x} -> {:#x} ({} units)", slot, text_offset, units);
        text_offset += 2 * units as u64;
    }

    if text_offset % 4 == 2 {
        utils::write_int(&mut out, IntKind::I16, text_offset, 0)?;
    }

    let fmg_header = FmgHeader {
        magic: header::MAGIC,
        file_size,
        version: options.version,
        reserved: 0,
        chunk_count: to_u32(chunks.len() as u64, "Chunk count")?,
        entry_count: to_u32(entries.len() as u64, "Entry count")?,
        offset_table_start: to_u32(start_offset, "Offset table start")?,
    };
    header::write(&mut out, &fmg_header)?;

    Ok(out.into_inner())
}

/// Encode `entries` and fully rewrite `path`, with default options.
pub fn write_file(entries: &Entries, path: impl AsRef<Path>) -> Result<()> {
    write_file_with(entries, path, WriteOptions::default())
}

/// Encode `entries` and fully rewrite `path`.
///
/// The image is built in memory first, so an encoding error leaves the
/// destination untouched. An I/O failure during the write itself leaves it
/// partially written.
pub fn write_file_with(entries: &Entries, path: impl AsRef<Path>, options: WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let image = encode(entries, options)?;

    let mut file = File::create(path)?;
    file.write_all(&image)?;
    file.flush()?;

    info!("Wrote {} entries ({} bytes) to {}", entries.len(), image.len(), path.display());
    Ok(())
}
