//! The boot decision sequence, wired together end to end.

use crate::{
    boot_machine::{decide, Action},
    consts::BOOT_CFG_PATH,
    handoff::{Handoff, Reset},
    loader::{ExecRegion, ImageLoader, LoadError},
    record::BootImage,
    record_store::RecordStore,
    storage::{Storage, StorageError},
};

/// How one boot cycle ends, short of actually leaving the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Exit {
    /// An image sits in the execution region, ready to run.
    Launch { base: usize },
    /// Fail-stop: reset and let the next boot re-evaluate the record.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum BootError {
    Storage(StorageError),
    Load(LoadError),
}

impl From<StorageError> for BootError {
    fn from(err: StorageError) -> Self {
        BootError::Storage(err)
    }
}

impl From<LoadError> for BootError {
    fn from(err: LoadError) -> Self {
        BootError::Load(err)
    }
}

/// Runs the whole per-boot sequence: record in, decision out, image
/// loaded, transport torn down.
pub struct BootSelector<S: Storage> {
    storage: S,
    region: ExecRegion,
}

impl<S: Storage> BootSelector<S> {
    pub fn new(storage: S, region: ExecRegion) -> Self {
        Self { storage, region }
    }

    /// One boot cycle. Every collaborator failure collapses to
    /// [`Exit::Reset`]; there is no in-place retry of anything.
    pub fn run(&mut self) -> Exit {
        match self.sequence() {
            Ok(exit) => exit,
            Err(err) => {
                fsb_log!(error, "Boot attempt failed: {:?}", err);
                Exit::Reset
            }
        }
    }

    fn sequence(&mut self) -> Result<Exit, BootError> {
        fsb_log!(info, "-- boot selector --");

        //
        // Step 0: Bring up the storage transport. Checked like every
        // other step; deciding anything against unreachable storage is
        // pointless.
        //
        self.storage.open()?;

        //
        // Step 1: Make sure exactly one boot record exists. A fresh
        // device gets first-boot defaults here.
        //
        let mut store = RecordStore::new(&mut self.storage, BOOT_CFG_PATH);
        let record = store.load_or_create()?;
        fsb_log!(info, "Boot status: {:?}", record.status);

        //
        // Step 2: One pure decision per boot.
        //
        let decision = decide(record);

        let image = match decision.action {
            Action::LoadFactory => BootImage::Factory,
            Action::LoadCustom => BootImage::Custom,

            // Step 2.1: An untrustworthy record gets wiped, then we
            // reset. No image is touched this cycle; the next boot
            // recreates defaults.
            Action::SelfHeal => {
                fsb_log!(warn, "Unrecognized boot record, wiping it");
                store.delete()?;
                return Ok(Exit::Reset);
            }
        };

        //
        // Step 3: Persist the updated record BEFORE anything risky
        // runs. This write-before-act ordering is the entire
        // power-loss safety argument; nothing below this point may
        // move above it.
        //
        if let Some(new_record) = decision.persist {
            fsb_log!(info, "Persisting record: {:?}", new_record);
            store.write(&new_record)?;
        }

        //
        // Step 4: Copy the chosen image into the execution region.
        //
        let mut loader = ImageLoader::new(&mut self.storage, self.region);
        loader.load(image)?;

        //
        // Step 5: Record and image are final, tear the transport down
        // before control leaves us for good.
        //
        self.storage.close()?;

        if image == BootImage::Factory {
            fsb_log!(info, "Running factory image");
        } else {
            fsb_log!(info, "Running custom image");
        }

        Ok(Exit::Launch {
            base: self.region.base(),
        })
    }
}

/// Run the selector and leave through the matching non-returning
/// primitive. This is the piece a board crate calls from its entry
/// point.
pub fn boot<S, H, R>(mut selector: BootSelector<S>, mut handoff: H, mut reset: R) -> !
where
    S: Storage,
    H: Handoff,
    R: Reset,
{
    match selector.run() {
        // The loader just placed a complete, vectored image at `base`.
        Exit::Launch { base } => unsafe { handoff.transfer(base) },
        Exit::Reset => reset.hard_reset(),
    }
}
