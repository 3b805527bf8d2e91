use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, info, trace, warn};

use super::format::{directory, header, text};
use super::types::error::{FmgError, Result};
use super::types::models::{Chunk, Entries, FmgHeader};
use super::types::options::ReadOptions;
use super::utils;

/// Decoder for FMG files over any seekable byte store.
///
/// Construction parses the header and chunk directory; [`entries`](Self::entries)
/// walks the offset table and string blob.
#[derive(Debug)]
pub struct FmgReader<R> {
    reader: R,
    file_len: u64,
    options: ReadOptions,
    pub header: FmgHeader,
    chunks: Vec<Chunk>,
}

impl FmgReader<BufReader<File>> {
    /// Open an FMG file from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened
    /// - Header fields point outside the file
    /// - A chunk row has `start_id > end_id`
    pub fn open(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening FMG file: {}", path.display());
        let file = File::open(path)?;
        Self::new(BufReader::new(file), options)
    }
}

impl<R: Read + Seek> FmgReader<R> {
    pub fn new(mut reader: R, options: ReadOptions) -> Result<Self> {
        options.validate()?;

        let header = header::parse(&mut reader)?;
        let file_len = header::stream_len(&mut reader)?;
        let chunks = directory::read(&mut reader, header.chunk_count)?;

        let slots = directory::slot_count(&chunks);
        let table_end = header.offset_table_start as u64 + slots * header::SLOT_SIZE;
        if table_end > file_len {
            return Err(FmgError::InvalidFormat(format!(
                "Offset table of {} slots ends at {:#x}, beyond end of file {:#x}",
                slots, table_end, file_len
            )));
        }
        if slots != header.entry_count as u64 {
            debug!("Chunk spans cover {} slots, header declares {}", slots, header.entry_count);
        }

        Ok(Self { reader, file_len, options, header, chunks })
    }

    /// Chunk directory rows, in directory order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Decode every entry into an ordered id → escaped text mapping.
    ///
    /// Ids are visited chunk by chunk in directory order, ascending within
    /// each chunk. A repeated id overwrites the earlier text.
    pub fn entries(&mut self) -> Result<Entries> {
        let mut entries = Entries::with_capacity(directory::slot_count(&self.chunks) as usize);

        for chunk in &self.chunks {
            for id in chunk.start_id..=chunk.end_id {
                let slot = self.header.offset_table_start as u64 + chunk.slot_index(id) * header::SLOT_SIZE;
                let text_offset = utils::read_u32(&mut self.reader, slot)? as u64;

                let stored = if text_offset == 0 {
                    String::new()
                } else {
                    if text_offset < header::HEADER_SIZE || text_offset >= self.file_len {
                        return Err(FmgError::InvalidFormat(format!(
                            "Entry {} points at {:#x}, outside the string region of a {}-byte file",
                            id, text_offset, self.file_len
                        )));
                    }
                    utils::read_utf16_string(&mut self.reader, text_offset, self.options.string_window)?
                };
                trace!("Entry {}: slot {:#x} -> {:#x}", id, slot, text_offset);

                if text::has_marker(&stored) {
                    warn!("Entry {} already contains {:?}; it will be saved as a line feed", id, text::NEWLINE_MARKER);
                }
                entries.insert(id, text::escape(&stored));
            }
        }

        debug!("Decoded {} entries from {} chunks", entries.len(), self.chunks.len());
        Ok(entries)
    }
}

/// Decode an FMG image from an in-memory or on-disk store.
pub fn decode<R: Read + Seek>(reader: R, options: ReadOptions) -> Result<Entries> {
    FmgReader::new(reader, options)?.entries()
}

/// Read an FMG file into an ordered id → text mapping, with default options.
pub fn read_file(path: impl AsRef<Path>) -> Result<Entries> {
    read_file_with(path, ReadOptions::default())
}

/// Read an FMG file into an ordered id → text mapping.
///
/// The file handle is released on return, including on error.
pub fn read_file_with(path: impl AsRef<Path>, options: ReadOptions) -> Result<Entries> {
    let mut reader = FmgReader::open(path, options)?;
    let entries = reader.entries()?;
    info!("Read {} entries in {} chunks", entries.len(), reader.chunks().len());
    Ok(entries)
}

/// Parse only the fixed header of an FMG file.
pub fn read_header(path: impl AsRef<Path>) -> Result<FmgHeader> {
    let mut file = BufReader::new(File::open(path)?);
    header::parse(&mut file)
}
