//! Copies a firmware image out of storage into the fixed
//! execution-memory region it will run from.

use crate::{
    consts::{CUSTOM_IMG_PATH, FACTORY_IMG_PATH, VECTOR_LEN},
    record::BootImage,
    storage::{Storage, StorageError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum LoadError {
    /// The image word does not name a loadable image.
    UnknownImage,
    /// The image would not fit the execution region. Never truncated,
    /// always rejected.
    TooLarge { len: usize, capacity: usize },
    /// The image is too short to even carry the two-word vector prefix.
    NoVector,
    /// Storage handed back fewer bytes than it reported.
    ShortRead { wanted: usize, got: usize },
    Storage(StorageError),
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        LoadError::Storage(err)
    }
}

/// The fixed memory window images are loaded into and executed from.
///
/// Plain value type so the decision flow can pass it around; the unsafe
/// part is asserting ownership of the raw region exactly once, at
/// construction.
#[derive(Clone, Copy)]
pub struct ExecRegion {
    base: *mut u8,
    capacity: usize,
}

impl ExecRegion {
    /// Describe the device's real execution region, normally
    /// [`EXEC_BASE_ADDR`] / [`EXEC_REGION_LEN`].
    ///
    /// [`EXEC_BASE_ADDR`]: crate::consts::EXEC_BASE_ADDR
    /// [`EXEC_REGION_LEN`]: crate::consts::EXEC_REGION_LEN
    ///
    /// # Safety
    ///
    /// `base..base + capacity` must be valid, writable memory that
    /// nothing else touches for the rest of the boot sequence.
    pub const unsafe fn at(base: usize, capacity: usize) -> Self {
        Self {
            base: base as *mut u8,
            capacity,
        }
    }

    /// Use a plain buffer as the execution region. This is how host
    /// tests observe what would have been run.
    pub fn from_slice(buf: &mut [u8]) -> Self {
        Self {
            base: buf.as_mut_ptr(),
            capacity: buf.len(),
        }
    }

    pub fn base(&self) -> usize {
        self.base as usize
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Loads one image per boot; never outlives the decision sequence.
pub struct ImageLoader<'s, S: Storage> {
    storage: &'s mut S,
    region: ExecRegion,
}

impl<'s, S: Storage> ImageLoader<'s, S> {
    pub fn new(storage: &'s mut S, region: ExecRegion) -> Self {
        Self { storage, region }
    }

    /// Copy the named image verbatim into the execution region.
    ///
    /// The length is checked against the region before a single byte
    /// moves, so a failed load never leaves a half-clobbered region
    /// behind a passed bounds check.
    pub fn load(&mut self, image: BootImage) -> Result<(), LoadError> {
        let path = match image {
            BootImage::Factory => FACTORY_IMG_PATH,
            BootImage::Custom => CUSTOM_IMG_PATH,
            BootImage::Unrecognized(raw) => {
                fsb_log!(error, "Refusing to load image word {=u32}", raw);
                return Err(LoadError::UnknownImage);
            }
        };

        let len = self.storage.size_of(path)?;

        if len < VECTOR_LEN {
            return Err(LoadError::NoVector);
        }

        if len > self.region.capacity {
            return Err(LoadError::TooLarge {
                len,
                capacity: self.region.capacity,
            });
        }

        fsb_log!(
            info,
            "Loading {=usize} bytes to {=usize:X}",
            len,
            self.region.base as usize
        );

        let dest = unsafe { core::slice::from_raw_parts_mut(self.region.base, len) };
        let got = self.storage.read(path, dest)?;

        if got < len {
            return Err(LoadError::ShortRead { wanted: len, got });
        }

        Ok(())
    }
}
