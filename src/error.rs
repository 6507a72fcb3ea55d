use thiserror::Error;

/// Broad classification of a [`RuneStringError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input handed to a decoder is not a valid rune string.
    Malformed,

    /// The chart handed to an encoder cannot be represented by the format.
    InvalidDomain,
}

#[derive(Debug, Error)]
pub enum RuneStringError {
    #[error("Input is not a valid rune string: {0}")]
    InvalidTransport(#[from] base64::DecodeError),

    #[error("Input is not a valid rune string: reserved byte is {0:#04x}")]
    InvalidReserved(u8),

    #[error("Input encodes an unsupported rune string version {0}")]
    UnsupportedVersion(u8),

    #[error("Input is not in version 1 of the format (found version {0})")]
    NotVersion1(u8),

    #[error("Unexpected end of input while reading {section}")]
    Truncated { section: &'static str },

    #[error("Varint in {section} does not fit in 64 bits")]
    VarintOverflow { section: &'static str },

    #[error("Invalid double rune combo value: {0}")]
    InvalidComboCode(u8),

    #[error("Multi rune column {0} does not fit in a byte")]
    ColumnOverflow(u64),

    #[error("Invalid payload for version {0}")]
    InvalidPayload(u8),

    #[error("Invalid double rune combo: ({first}, {second}) at time {time}")]
    InvalidDoubleRune { time: f64, first: u8, second: u8 },

    #[error("Single rune column {column} at time {time} does not fit in 2 bits")]
    InvalidSingleColumn { time: f64, column: u8 },

    #[error("Expected a group of {expected} runes at time {time}, found {found}")]
    GroupSizeMismatch {
        time: f64,
        expected: usize,
        found: usize,
    },

    #[error("Multi rune at time {time} holds {count} runes, more than a count byte can hold")]
    GroupTooLarge { time: f64, count: usize },

    #[error("Cannot encode {field} {value}: must be finite and non-negative")]
    InvalidTime { field: &'static str, value: f64 },
}

impl RuneStringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransport(_)
            | Self::InvalidReserved(_)
            | Self::UnsupportedVersion(_)
            | Self::NotVersion1(_)
            | Self::Truncated { .. }
            | Self::VarintOverflow { .. }
            | Self::InvalidComboCode(_)
            | Self::ColumnOverflow(_) => ErrorKind::Malformed,

            Self::InvalidPayload(_)
            | Self::InvalidDoubleRune { .. }
            | Self::InvalidSingleColumn { .. }
            | Self::GroupSizeMismatch { .. }
            | Self::GroupTooLarge { .. }
            | Self::InvalidTime { .. } => ErrorKind::InvalidDomain,
        }
    }
}
