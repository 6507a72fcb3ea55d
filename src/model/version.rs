use crate::error::RuneStringError;
use crate::model::chart::RuneStringData;

/// Supported revisions of the rune string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Version {
    /// Basic list of runes and bpm changes.
    #[default]
    V1 = 1,
}

impl Version {
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Version {
    type Error = RuneStringError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(Version::V1),
            other => Err(RuneStringError::UnsupportedVersion(other)),
        }
    }
}

/// A decoded rune string. Each format revision carries its own payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    V1(RuneStringData),
}

impl Payload {
    pub fn version(&self) -> Version {
        match self {
            Payload::V1(_) => Version::V1,
        }
    }
}

impl From<RuneStringData> for Payload {
    fn from(data: RuneStringData) -> Self {
        Payload::V1(data)
    }
}
