//! Caller-tunable settings for reading and writing FMG files.

use super::error::{FmgError, Result};

/// Smallest accepted string read window, in bytes.
pub const MIN_STRING_WINDOW: usize = 1024;

/// Default string read window, in bytes.
pub const DEFAULT_STRING_WINDOW: usize = 4096;

/// Format/version byte written at 0x08 by default.
pub const DEFAULT_VERSION: u8 = 1;

/// Settings for the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Number of bytes fetched per read while scanning for a string's
    /// terminator. Scanning continues window by window until the
    /// terminator or end of file, so this only affects read granularity.
    pub string_window: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { string_window: DEFAULT_STRING_WINDOW }
    }
}

impl ReadOptions {
    /// Checks that the window is large enough and keeps two-byte lanes aligned.
    pub fn validate(&self) -> Result<()> {
        if self.string_window < MIN_STRING_WINDOW {
            return Err(FmgError::InvalidArgument(format!(
                "String window of {} bytes is below the minimum of {}",
                self.string_window, MIN_STRING_WINDOW
            )));
        }
        if self.string_window % 2 != 0 {
            return Err(FmgError::InvalidArgument(format!(
                "String window must be even, got {}",
                self.string_window
            )));
        }
        Ok(())
    }
}

/// Settings for the encode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Format/version byte stored at 0x08.
    pub version: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { version: DEFAULT_VERSION }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_valid() {
        assert!(ReadOptions::default().validate().is_ok());
    }

    #[test]
    fn small_or_odd_windows_are_rejected() {
        let small = ReadOptions { string_window: 512 };
        assert!(matches!(small.validate(), Err(FmgError::InvalidArgument(_))));
        let odd = ReadOptions { string_window: 2049 };
        assert!(matches!(odd.validate(), Err(FmgError::InvalidArgument(_))));
    }
}
