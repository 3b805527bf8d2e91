//! Binary primitive accessor.
//!
//! Positioned little-endian integer reads/writes and terminator-delimited
//! UTF-16LE strings over any seekable byte store. Nothing here knows about
//! the FMG layout.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use encoding_rs::UTF_16LE;

use super::types::error::{FmgError, Result};
use super::types::models::IntKind;

/// Seek to `offset` and read one little-endian integer of the given kind.
///
/// Seeking past the end is allowed by the store, so an out-of-range offset
/// surfaces as the short read that follows.
pub fn read_int<R: Read + Seek>(reader: &mut R, kind: IntKind, offset: u64) -> Result<i64> {
    reader.seek(SeekFrom::Start(offset))?;
    let value = match kind {
        IntKind::I8 => reader.read_i8()? as i64,
        IntKind::U8 => reader.read_u8()? as i64,
        IntKind::I16 => reader.read_i16::<LittleEndian>()? as i64,
        IntKind::U32 => reader.read_u32::<LittleEndian>()? as i64,
    };
    Ok(value)
}

/// Shorthand for the most common read: a `u32` at `offset`.
pub fn read_u32<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<u32> {
    // Lossless: a U32 read always fits.
    Ok(read_int(reader, IntKind::U32, offset)? as u32)
}

/// Seek to `offset` and write `value` as a little-endian integer of the given kind.
///
/// Writing past the current end relies on the store zero-filling the gap
/// (`Cursor<Vec<u8>>` and `File` both do). The encoder pre-sizes its buffer
/// anyway, so it never depends on that.
pub fn write_int<W: Write + Seek>(writer: &mut W, kind: IntKind, offset: u64, value: i64) -> Result<()> {
    let out_of_range = || {
        FmgError::InvalidArgument(format!("Value {} does not fit in {}", value, kind))
    };
    writer.seek(SeekFrom::Start(offset))?;
    match kind {
        IntKind::I8 => writer.write_i8(i8::try_from(value).map_err(|_| out_of_range())?)?,
        IntKind::U8 => writer.write_u8(u8::try_from(value).map_err(|_| out_of_range())?)?,
        IntKind::I16 => {
            writer.write_i16::<LittleEndian>(i16::try_from(value).map_err(|_| out_of_range())?)?
        }
        IntKind::U32 => {
            writer.write_u32::<LittleEndian>(u32::try_from(value).map_err(|_| out_of_range())?)?
        }
    }
    Ok(())
}

/// Read a null-terminated UTF-16LE string starting at `offset`.
///
/// Data is fetched `window` bytes at a time. Only two-byte lanes at even
/// distances from `offset` are checked for the terminator, and a single
/// trailing byte left at end of file is never decoded. Reading at or past
/// end of file yields an empty string.
///
/// `window` must be even so that lane alignment holds across windows.
pub fn read_utf16_string<R: Read + Seek>(reader: &mut R, offset: u64, window: usize) -> Result<String> {
    reader.seek(SeekFrom::Start(offset))?;

    let mut data: Vec<u8> = Vec::with_capacity(window);
    let mut scanned = 0;
    let mut terminator = None;

    loop {
        let fetched = reader.by_ref().take(window as u64).read_to_end(&mut data)?;

        while scanned + 1 < data.len() {
            if data[scanned] == 0 && data[scanned + 1] == 0 {
                terminator = Some(scanned);
                break;
            }
            scanned += 2;
        }

        if terminator.is_some() || fetched < window {
            break;
        }
    }

    // Without a terminator, decode whole code units only.
    let end = terminator.unwrap_or(data.len() & !1);
    if end == 0 {
        return Ok(String::new());
    }

    UTF_16LE
        .decode_without_bom_handling_and_without_replacement(&data[..end])
        .map(|text| text.into_owned())
        .ok_or_else(|| FmgError::InvalidFormat(format!("Malformed UTF-16 string at offset {:#x}", offset)))
}

/// Write `text` as UTF-16LE code units at `offset`, with no length prefix.
///
/// No terminator is added; the caller appends a trailing `U+0000` to `text`
/// first. Returns the number of code units written.
pub fn write_utf16_string<W: Write + Seek>(writer: &mut W, offset: u64, text: &str) -> Result<usize> {
    writer.seek(SeekFrom::Start(offset))?;
    let mut units = 0;
    for unit in text.encode_utf16() {
        writer.write_u16::<LittleEndian>(unit)?;
        units += 1;
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn utf16z(text: &str) -> Vec<u8> {
        text.encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(|u| u.to_le_bytes())
            .collect()
    }

    #[test]
    fn reads_little_endian_integers() {
        let mut cur = Cursor::new(vec![0xFF, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(read_int(&mut cur, IntKind::I8, 0).unwrap(), -1);
        assert_eq!(read_int(&mut cur, IntKind::U8, 0).unwrap(), 0xFF);
        assert_eq!(read_int(&mut cur, IntKind::I16, 1).unwrap(), 0x1234);
        assert_eq!(read_u32(&mut cur, 3).unwrap(), 0x1234_5678);
    }

    #[test]
    fn short_read_is_an_io_error() {
        let mut cur = Cursor::new(vec![1, 2, 3]);
        assert!(matches!(read_u32(&mut cur, 0), Err(FmgError::Io(_))));
        assert!(matches!(read_u32(&mut cur, 100), Err(FmgError::Io(_))));
    }

    #[test]
    fn write_past_end_zero_fills_gap() {
        let mut cur = Cursor::new(Vec::new());
        write_int(&mut cur, IntKind::U32, 8, 0x0102_0304).unwrap();
        assert_eq!(cur.into_inner(), vec![0, 0, 0, 0, 0, 0, 0, 0, 4, 3, 2, 1]);
    }

    #[test]
    fn write_rejects_out_of_range_values() {
        let mut cur = Cursor::new(Vec::new());
        let err = write_int(&mut cur, IntKind::U8, 0, 256).unwrap_err();
        assert!(matches!(err, FmgError::InvalidArgument(_)));
        let err = write_int(&mut cur, IntKind::U32, 0, -1).unwrap_err();
        assert!(matches!(err, FmgError::InvalidArgument(_)));
    }

    #[test]
    fn string_stops_at_first_aligned_terminator() {
        let mut bytes = vec![0xAA, 0xBB];
        bytes.extend(utf16z("Héllo"));
        bytes.extend(utf16z("next"));
        let mut cur = Cursor::new(bytes);
        assert_eq!(read_utf16_string(&mut cur, 2, 1024).unwrap(), "Héllo");
    }

    #[test]
    fn unaligned_zero_pair_is_not_a_terminator() {
        // Bytes 1..3 are a zero pair straddling two lanes.
        let bytes = vec![0x01, 0x00, 0x00, 0x01, 0x00, 0x00];
        let mut cur = Cursor::new(bytes);
        assert_eq!(read_utf16_string(&mut cur, 0, 1024).unwrap(), "\u{0001}\u{0100}");
    }

    #[test]
    fn leading_terminator_and_eof_give_empty_text() {
        let mut cur = Cursor::new(vec![0, 0, 0x41, 0]);
        assert_eq!(read_utf16_string(&mut cur, 0, 1024).unwrap(), "");
        assert_eq!(read_utf16_string(&mut cur, 64, 1024).unwrap(), "");
    }

    #[test]
    fn odd_trailing_byte_is_dropped() {
        let mut cur = Cursor::new(vec![0x41, 0x00, 0x42]);
        assert_eq!(read_utf16_string(&mut cur, 0, 1024).unwrap(), "A");
    }

    #[test]
    fn strings_longer_than_one_window_are_not_truncated() {
        let long = "x".repeat(3000);
        let mut cur = Cursor::new(utf16z(&long));
        assert_eq!(read_utf16_string(&mut cur, 0, 1024).unwrap(), long);
    }

    #[test]
    fn unpaired_surrogate_is_a_format_error() {
        let mut cur = Cursor::new(vec![0x00, 0xD8, 0x41, 0x00, 0x00, 0x00]);
        assert!(matches!(
            read_utf16_string(&mut cur, 0, 1024),
            Err(FmgError::InvalidFormat(_))
        ));
    }

    #[test]
    fn writes_code_units_without_terminator() {
        let mut cur = Cursor::new(Vec::new());
        let units = write_utf16_string(&mut cur, 2, "A\u{1F600}").unwrap();
        assert_eq!(units, 3);
        assert_eq!(cur.into_inner(), vec![0, 0, 0x41, 0, 0x3D, 0xD8, 0x00, 0xDE]);
    }
}
