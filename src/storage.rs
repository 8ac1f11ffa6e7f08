//! Seam for the path-addressed storage service the boot selector runs
//! against, typically a serial flash filesystem reached over some
//! transport that needs explicit bring-up.

/// Failure surfaced by the storage collaborator.
///
/// Every one of these is fatal to the current boot attempt: the selector
/// never retries in place, it resets and lets the next boot re-evaluate
/// the record from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum StorageError {
    /// No allocation exists at the given path.
    NotFound,
    /// `create` on a path that already has an allocation.
    AlreadyExists,
    /// Write larger than the allocated capacity of the slot.
    CapacityExceeded,
    /// Fewer bytes came back than the caller requires.
    ShortRead,
    /// Any other underlying I/O failure.
    Io,
}

/// Path-addressed storage with fixed-capacity allocations.
///
/// `open`/`close` bracket the transport that exposes the medium. All
/// other operations are only valid between a successful `open` and the
/// matching `close`.
pub trait Storage {
    /// Bring up the transport. Must be checked; storage access before a
    /// successful `open` is a contract violation.
    fn open(&mut self) -> Result<(), StorageError>;

    /// Tear the transport down again.
    fn close(&mut self) -> Result<(), StorageError>;

    fn exists(&mut self, path: &str) -> bool;

    /// Allocate a fixed-capacity slot at `path`. The allocation never
    /// grows; callers size it up front.
    fn create(&mut self, path: &str, capacity: usize) -> Result<(), StorageError>;

    /// Length of the payload currently stored at `path`.
    fn size_of(&mut self, path: &str) -> Result<usize, StorageError>;

    /// Read the payload at `path` from offset zero into `buf`, returning
    /// the number of bytes copied.
    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the payload at `path` with `data`, starting at offset
    /// zero. After a power cycle the slot holds either the old payload
    /// or the new one, never a caller-visible partial append.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    fn delete(&mut self, path: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &mut T {
    fn open(&mut self) -> Result<(), StorageError> {
        (**self).open()
    }

    fn close(&mut self) -> Result<(), StorageError> {
        (**self).close()
    }

    fn exists(&mut self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn create(&mut self, path: &str, capacity: usize) -> Result<(), StorageError> {
        (**self).create(path, capacity)
    }

    fn size_of(&mut self, path: &str) -> Result<usize, StorageError> {
        (**self).size_of(path)
    }

    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(path, buf)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(path, data)
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        (**self).delete(path)
    }
}
