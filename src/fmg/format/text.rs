//! Newline escaping between stored strings and single-line editing.
//!
//! Stored strings may contain line feeds; the editing surface treats each
//! entry as one line. Decoding swaps every `\n` for [`NEWLINE_MARKER`] and
//! encoding swaps it back. A marker that already occurs in stored text is
//! not distinguishable from an escaped line feed and comes back as `\n`
//! after a save.

/// In-text substitute for a line feed.
pub const NEWLINE_MARKER: &str = "/n/";

/// Editor artifact dropped before unescaping.
const CRLF: &str = "\r\n";

/// Replace every line feed with [`NEWLINE_MARKER`].
pub fn escape(text: &str) -> String {
    text.replace('\n', NEWLINE_MARKER)
}

/// Undo [`escape`], after dropping literal `\r\n` pairs left by an editor.
pub fn unescape(text: &str) -> String {
    text.replace(CRLF, "").replace(NEWLINE_MARKER, "\n")
}

/// Whether stored text already holds the marker, so it will not survive a
/// decode/encode cycle unchanged.
pub fn has_marker(text: &str) -> bool {
    text.contains(NEWLINE_MARKER)
}
