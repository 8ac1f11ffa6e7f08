//! The boot record: the single persisted struct the whole rollback
//! protocol hangs off of.

use crate::consts::RECORD_LEN;

/// Status word of the boot record.
///
/// Values outside the known range are kept, not rejected: the decision
/// logic has an explicit arm for them, and the raw value survives a
/// write/read round trip untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum BootStatus {
    /// Last boot succeeded, repeat it.
    Ok,
    /// New firmware staged, attempt it next.
    Check,
    /// An unconfirmed attempt is in progress. Finding this on a cold
    /// boot means the attempt died before confirming itself.
    Checking,
    /// The application reported the custom image unhealthy.
    Err,
    /// Anything else found in storage.
    Unrecognized(u32),
}

impl BootStatus {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => BootStatus::Ok,
            1 => BootStatus::Check,
            2 => BootStatus::Checking,
            3 => BootStatus::Err,
            _ => BootStatus::Unrecognized(raw),
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            BootStatus::Ok => 0,
            BootStatus::Check => 1,
            BootStatus::Checking => 2,
            BootStatus::Err => 3,
            BootStatus::Unrecognized(raw) => raw,
        }
    }
}

/// Image word of the boot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum BootImage {
    Factory,
    Custom,
    Unrecognized(u32),
}

impl BootImage {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => BootImage::Factory,
            1 => BootImage::Custom,
            _ => BootImage::Unrecognized(raw),
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            BootImage::Factory => 0,
            BootImage::Custom => 1,
            BootImage::Unrecognized(raw) => raw,
        }
    }
}

/// The persisted boot record: status word first, image word second,
/// both little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct BootRecord {
    pub status: BootStatus,
    pub image: BootImage,
}

impl BootRecord {
    /// The record created when none exists yet: boot the factory
    /// image, nothing pending.
    pub const FIRST_BOOT: Self = BootRecord {
        status: BootStatus::Ok,
        image: BootImage::Factory,
    };

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[..4].copy_from_slice(&self.status.as_raw().to_le_bytes());
        bytes[4..].copy_from_slice(&self.image.as_raw().to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; RECORD_LEN]) -> Self {
        let mut status = [0u8; 4];
        let mut image = [0u8; 4];
        status.copy_from_slice(&bytes[..4]);
        image.copy_from_slice(&bytes[4..]);

        BootRecord {
            status: BootStatus::from_raw(u32::from_le_bytes(status)),
            image: BootImage::from_raw(u32::from_le_bytes(image)),
        }
    }
}
