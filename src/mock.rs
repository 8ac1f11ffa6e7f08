//! RAM-backed stand-in for the storage collaborator, with a journal of
//! every operation so tests can assert ordering, not just end state.

use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use crate::storage::{Storage, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open,
    Close,
    Create(String),
    Read(String),
    Write(String),
    Delete(String),
}

struct Slot {
    capacity: usize,
    data: Vec<u8>,
}

pub struct RamStorage {
    slots: BTreeMap<String, Slot>,
    pub journal: Vec<Event>,
    opened: bool,
    read_limit: Option<usize>,
    fail_open: bool,
    fail_close: bool,
}

impl RamStorage {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            journal: Vec::new(),
            opened: false,
            read_limit: None,
            fail_open: false,
            fail_close: false,
        }
    }

    /// Pre-populate an image file, as the factory or an updater
    /// would have.
    pub fn install_image(&mut self, path: &str, bytes: &[u8]) {
        self.slots.insert(
            String::from(path),
            Slot {
                capacity: bytes.len(),
                data: bytes.to_vec(),
            },
        );
    }

    pub fn capacity_of(&self, path: &str) -> Option<usize> {
        self.slots.get(path).map(|slot| slot.capacity)
    }

    /// Make every subsequent read hand back at most `n` bytes.
    pub fn truncate_reads_to(&mut self, n: usize) {
        self.read_limit = Some(n);
    }

    pub fn fail_open(&mut self) {
        self.fail_open = true;
    }

    pub fn fail_close(&mut self) {
        self.fail_close = true;
    }

    /// Journal position of the first event matching `pred`.
    pub fn position_of(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.journal.iter().position(pred)
    }
}

impl Storage for RamStorage {
    fn open(&mut self) -> Result<(), StorageError> {
        self.journal.push(Event::Open);
        if self.fail_open {
            return Err(StorageError::Io);
        }
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), StorageError> {
        self.journal.push(Event::Close);
        if self.fail_close {
            return Err(StorageError::Io);
        }
        self.opened = false;
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        assert!(self.opened, "storage access before open");
        self.slots.contains_key(path)
    }

    fn create(&mut self, path: &str, capacity: usize) -> Result<(), StorageError> {
        assert!(self.opened, "storage access before open");
        self.journal.push(Event::Create(String::from(path)));

        if self.slots.contains_key(path) {
            return Err(StorageError::AlreadyExists);
        }

        self.slots.insert(
            String::from(path),
            Slot {
                capacity,
                data: Vec::new(),
            },
        );
        Ok(())
    }

    fn size_of(&mut self, path: &str) -> Result<usize, StorageError> {
        assert!(self.opened, "storage access before open");
        self.slots
            .get(path)
            .map(|slot| slot.data.len())
            .ok_or(StorageError::NotFound)
    }

    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        assert!(self.opened, "storage access before open");
        self.journal.push(Event::Read(String::from(path)));

        let slot = self.slots.get(path).ok_or(StorageError::NotFound)?;

        let mut n = slot.data.len().min(buf.len());
        if let Some(limit) = self.read_limit {
            n = n.min(limit);
        }

        buf[..n].copy_from_slice(&slot.data[..n]);
        Ok(n)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        assert!(self.opened, "storage access before open");
        self.journal.push(Event::Write(String::from(path)));

        let slot = self.slots.get_mut(path).ok_or(StorageError::NotFound)?;

        if data.len() > slot.capacity {
            return Err(StorageError::CapacityExceeded);
        }

        slot.data = data.to_vec();
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        assert!(self.opened, "storage access before open");
        self.journal.push(Event::Delete(String::from(path)));

        self.slots
            .remove(path)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}
