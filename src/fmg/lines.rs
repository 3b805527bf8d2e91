//! Line-oriented text form of an entry mapping: one `id<TAB>text` per line.
//!
//! Texts are expected to be escaped (see [`crate::fmg::format::text`]), so
//! each entry fits on a single line.

use std::io::{BufRead, Write};

use super::types::error::{FmgError, Result};
use super::types::models::Entries;

/// Write every entry as `id<TAB>text\n`, in mapping order.
pub fn export_lines<W: Write>(entries: &Entries, mut writer: W) -> Result<()> {
    for (id, text) in entries {
        writeln!(writer, "{}\t{}", id, text)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse lines written by [`export_lines`]. Blank lines are skipped.
///
/// Only the line feed ending each line is removed, so a text that ends in
/// `\r` keeps it.
///
/// # Errors
/// `InvalidArgument` naming the 1-based line number for a missing tab, an id
/// that is not a `u32`, or a repeated id.
pub fn import_lines<R: BufRead>(mut reader: R) -> Result<Entries> {
    let mut entries = Entries::new();
    let mut line = String::new();
    let mut line_no = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_no += 1;

        let content = line.strip_suffix('\n').unwrap_or(&line);
        if content.is_empty() {
            continue;
        }

        let (id, text) = content
            .split_once('\t')
            .ok_or_else(|| FmgError::InvalidArgument(format!("Line {}: expected <id>\\t<text>", line_no)))?;
        let id: u32 = id
            .parse()
            .map_err(|_| FmgError::InvalidArgument(format!("Line {}: invalid id {:?}", line_no, id)))?;

        if entries.insert(id, text.to_string()).is_some() {
            return Err(FmgError::InvalidArgument(format!("Line {}: duplicate id {}", line_no, id)));
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_keeps_order_and_text() {
        let mut entries = Entries::new();
        entries.insert(5, "Hello".to_string());
        entries.insert(6, String::new());
        entries.insert(9, "World/n/Next\twith tab\r".to_string());

        let mut buf = Vec::new();
        export_lines(&entries, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "5\tHello\n6\t\n9\tWorld/n/Next\twith tab\r\n"
        );

        let imported = import_lines(buf.as_slice()).unwrap();
        assert_eq!(imported, entries);
        assert!(imported.keys().copied().eq([5, 6, 9]));
    }

    #[test]
    fn bad_lines_report_their_number() {
        let err = import_lines("1\tok\n\nnot a row\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "{}", err);

        let err = import_lines("x\ttext\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FmgError::InvalidArgument(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = import_lines("1\ta\n1\tb\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate id 1"), "{}", err);
    }
}
