//! Fixed FMG header: field offsets, parsing, and finalisation.
//!
//! ```text
//! 0x00 u32  magic (0x10000)
//! 0x04 u32  total file size
//! 0x08 u8   format/version
//! 0x09 i8   reserved
//! 0x0C u32  chunk count
//! 0x10 u32  entry count
//! 0x14 u32  offset-table start
//! 0x1C ..   chunk directory
//! ```

use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, warn};

use crate::fmg::types::error::{FmgError, Result};
use crate::fmg::types::models::{FmgHeader, IntKind};
use crate::fmg::utils;

/// Magic/version constant stored at 0x00.
pub const MAGIC: u32 = 0x10000;

pub const FILE_SIZE_OFFSET: u64 = 0x04;
pub const VERSION_OFFSET: u64 = 0x08;
pub const RESERVED_OFFSET: u64 = 0x09;
pub const CHUNK_COUNT_OFFSET: u64 = 0x0C;
pub const ENTRY_COUNT_OFFSET: u64 = 0x10;
pub const OFFSET_TABLE_START_OFFSET: u64 = 0x14;

/// Size of the fixed header; the chunk directory starts here.
pub const HEADER_SIZE: u64 = 0x1C;

/// Size of one offset-table slot.
pub const SLOT_SIZE: u64 = 4;

/// Returns the total length of the store, leaving the cursor at the end.
pub fn stream_len<S: Seek>(stream: &mut S) -> Result<u64> {
    Ok(stream.seek(SeekFrom::End(0))?)
}

/// Parse the fixed header and check that the regions it describes fit in the file.
///
/// # Errors
/// - `InvalidFormat` if the file is shorter than the header, or the chunk
///   directory or offset-table start lies beyond end of file
/// - `Io` on any failed seek or read
pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<FmgHeader> {
    let file_len = stream_len(reader)?;
    if file_len < HEADER_SIZE {
        return Err(FmgError::InvalidFormat(format!(
            "File is {} bytes, shorter than the {}-byte header",
            file_len, HEADER_SIZE
        )));
    }

    let header = FmgHeader {
        magic: utils::read_u32(reader, 0)?,
        file_size: utils::read_u32(reader, FILE_SIZE_OFFSET)?,
        version: utils::read_int(reader, IntKind::U8, VERSION_OFFSET)? as u8,
        reserved: utils::read_int(reader, IntKind::I8, RESERVED_OFFSET)? as i8,
        chunk_count: utils::read_u32(reader, CHUNK_COUNT_OFFSET)?,
        entry_count: utils::read_u32(reader, ENTRY_COUNT_OFFSET)?,
        offset_table_start: utils::read_u32(reader, OFFSET_TABLE_START_OFFSET)?,
    };

    debug!(
        "Header: magic={:#x}, size={}, version={}, reserved={}, chunks={}, entries={}, table={:#x}",
        header.magic,
        header.file_size,
        header.version,
        header.reserved,
        header.chunk_count,
        header.entry_count,
        header.offset_table_start
    );

    if header.magic != MAGIC {
        warn!("Unexpected magic {:#x} (expected {:#x})", header.magic, MAGIC);
    }
    if header.file_size as u64 != file_len {
        warn!("Stored file size {} differs from actual size {}", header.file_size, file_len);
    }

    let directory_end = directory_end(header.chunk_count);
    if directory_end > file_len {
        return Err(FmgError::InvalidFormat(format!(
            "Chunk directory of {} rows ends at {:#x}, beyond end of file {:#x}",
            header.chunk_count, directory_end, file_len
        )));
    }
    if header.offset_table_start as u64 > file_len {
        return Err(FmgError::InvalidFormat(format!(
            "Offset table starts at {:#x}, beyond end of file {:#x}",
            header.offset_table_start, file_len
        )));
    }

    Ok(header)
}

/// Write every header field, in on-disk order.
///
/// Called last by the encoder, once the file size and table start are final.
pub fn write<W: Write + Seek>(writer: &mut W, header: &FmgHeader) -> Result<()> {
    utils::write_int(writer, IntKind::U32, 0, header.magic as i64)?;
    utils::write_int(writer, IntKind::U32, FILE_SIZE_OFFSET, header.file_size as i64)?;
    utils::write_int(writer, IntKind::U8, VERSION_OFFSET, header.version as i64)?;
    utils::write_int(writer, IntKind::I8, RESERVED_OFFSET, header.reserved as i64)?;
    utils::write_int(writer, IntKind::U32, CHUNK_COUNT_OFFSET, header.chunk_count as i64)?;
    utils::write_int(writer, IntKind::U32, ENTRY_COUNT_OFFSET, header.entry_count as i64)?;
    utils::write_int(writer, IntKind::U32, OFFSET_TABLE_START_OFFSET, header.offset_table_start as i64)?;
    Ok(())
}

/// First byte past a directory of `chunk_count` rows.
pub fn directory_end(chunk_count: u32) -> u64 {
    HEADER_SIZE + super::directory::ROW_SIZE * chunk_count as u64
}
