//! Persistence of the boot record as a small fixed-size blob at a
//! well-known path.

use crate::{
    consts::{BOOT_CFG_CAPACITY, RECORD_LEN},
    record::{BootImage, BootRecord, BootStatus},
    storage::{Storage, StorageError},
};

/// Reads and writes the single boot record through the storage
/// collaborator.
///
/// The path is given at construction so nothing in here depends on a
/// process-wide constant; the decision flow passes
/// [`crate::consts::BOOT_CFG_PATH`].
pub struct RecordStore<'s, S: Storage> {
    storage: &'s mut S,
    path: &'s str,
}

impl<'s, S: Storage> RecordStore<'s, S> {
    pub fn new(storage: &'s mut S, path: &'s str) -> Self {
        Self { storage, path }
    }

    pub fn exists(&mut self) -> bool {
        self.storage.exists(self.path)
    }

    /// Allocate the record slot. Only call when [`exists`] is false.
    ///
    /// [`exists`]: RecordStore::exists
    pub fn create(&mut self) -> Result<(), StorageError> {
        self.storage.create(self.path, BOOT_CFG_CAPACITY)
    }

    /// Read the current record. Callers check [`exists`] first; reading
    /// a slot that was never created is the storage service's undefined
    /// territory.
    ///
    /// [`exists`]: RecordStore::exists
    pub fn read(&mut self) -> Result<BootRecord, StorageError> {
        let mut bytes = [0u8; RECORD_LEN];
        let n = self.storage.read(self.path, &mut bytes)?;

        if n < RECORD_LEN {
            fsb_log!(error, "Record payload truncated: {=usize} bytes", n);
            return Err(StorageError::ShortRead);
        }

        Ok(BootRecord::from_bytes(&bytes))
    }

    /// Persist `record`, fully replacing the previous contents. Creates
    /// the slot first if it does not exist yet.
    pub fn write(&mut self, record: &BootRecord) -> Result<(), StorageError> {
        if !self.storage.exists(self.path) {
            self.create()?;
        }

        self.storage.write(self.path, &record.to_bytes())
    }

    pub fn delete(&mut self) -> Result<(), StorageError> {
        self.storage.delete(self.path)
    }

    /// Read the record, creating it with first-boot defaults if this is
    /// the very first boot and none exists yet.
    pub fn load_or_create(&mut self) -> Result<BootRecord, StorageError> {
        if !self.exists() {
            fsb_log!(info, "No boot record found, creating defaults");
            self.write(&BootRecord::FIRST_BOOT)?;
        }

        self.read()
    }

    /// Stage a freshly installed custom image for its trial boot.
    ///
    /// This is the updater's half of the protocol; the boot decision
    /// flow itself never arms anything.
    pub fn arm_update(&mut self) -> Result<(), StorageError> {
        self.write(&BootRecord {
            status: BootStatus::Check,
            image: BootImage::Custom,
        })
    }
}
