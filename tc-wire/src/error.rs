//! Error type shared by every codec in the crate.

use thiserror::Error;

/// Errors returned by the record codecs, the pedit key packer and the command parser.
///
/// Every error is reported before the selector it concerns is touched, so a failed call
/// leaves keys and key count exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Fewer bytes than the record (or its declared trailing keys) require.
    #[error("truncated {record}: need {expected} bytes, got {actual}")]
    Truncated {
        /// Name of the record being decoded.
        record: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
    /// The selector, or the count field of a variable record, is full.
    #[error("key capacity exceeded (max {capacity})")]
    CapacityExceeded {
        /// Maximum number of keys the selector holds.
        capacity: usize,
    },
    /// The offset cannot hold a field of this width.
    #[error("offset {offset} is not a valid start for a {width}-byte field")]
    Misaligned {
        /// Byte offset requested by the caller.
        offset: u32,
        /// Width of the field in bytes.
        width: u8,
    },
    /// Value or mask is wider than the declared field.
    #[error("value {value:#x} / mask {mask:#x} does not fit in {width} bytes")]
    OutOfRange {
        /// Offending value.
        value: u32,
        /// Offending mask.
        mask: u32,
        /// Declared width in bytes.
        width: u8,
    },
    /// Non-default header type or command on a selector that is not in extended mode.
    #[error(
        "munge parameters (htype {htype}, cmd {cmd}) not supported on a legacy selector, \
         enable extended mode (pedit ex)"
    )]
    ExtendedModeRequired {
        /// Header type carried by the key.
        htype: u16,
        /// Command carried by the key.
        cmd: u16,
    },
    /// Literal text could not be parsed as the declared value type.
    #[error("malformed {kind} literal: {literal:?}")]
    MalformedLiteral {
        /// Value type the literal was parsed as.
        kind: &'static str,
        /// The literal as supplied.
        literal: String,
    },
    /// Field width other than 1, 2 or 4 bytes.
    #[error("unsupported field width {0}")]
    InvalidWidth(u32),
    /// The command did not name a target field.
    #[error("pedit command has no target field")]
    MissingField,
}

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
