//! The boot decision state machine.
//!
//! `decide` is the entire crash-consistency argument in one function.
//! There is no journal and no second copy of the record; the only
//! guarantee underneath is that a record write appears complete-or-absent
//! across a power cycle, and that the caller persists `Decision::persist`
//! *before* acting on `Decision::action`. Given that, a cold boot can
//! only ever observe:
//!
//! * `Ok` / `Check`: the pre-attempt states, handled normally, or
//! * `Checking`: an attempt was armed and never confirmed, so it is
//!   treated as failed and rolled back,
//!
//! never an ambiguous mix.

use crate::record::{BootImage, BootRecord, BootStatus};

/// What to do after the record has been consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Action {
    LoadFactory,
    LoadCustom,
    /// The record is untrustworthy: delete it and hard reset, so the
    /// next boot recreates first-boot defaults.
    SelfHeal,
}

/// Outcome of one decision: an optional record to persist, and the
/// action to take once (and only once) persistence has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Decision {
    pub persist: Option<BootRecord>,
    pub action: Action,
}

/// Roll a failed or unconfirmed update back to the factory image.
const fn roll_back() -> Decision {
    Decision {
        persist: Some(BootRecord {
            status: BootStatus::Ok,
            image: BootImage::Factory,
        }),
        action: Action::LoadFactory,
    }
}

/// Pure transition function of the boot protocol. No I/O, total over
/// every representable record, including out-of-range words.
pub fn decide(record: BootRecord) -> Decision {
    match (record.status, record.image) {
        // Stable: last boot succeeded, repeat it. No write.
        (BootStatus::Ok, BootImage::Factory) => Decision {
            persist: None,
            action: Action::LoadFactory,
        },
        (BootStatus::Ok, BootImage::Custom) => Decision {
            persist: None,
            action: Action::LoadCustom,
        },

        // A new custom image is staged. Arm the dead-man's switch
        // first: once `Checking` is on the medium, a crash anywhere in
        // the attempt is detectable on the next boot.
        (BootStatus::Check, BootImage::Factory | BootImage::Custom) => Decision {
            persist: Some(BootRecord {
                status: BootStatus::Checking,
                image: BootImage::Custom,
            }),
            action: Action::LoadCustom,
        },

        // The previous attempt never confirmed itself healthy before
        // this reboot. Treat as a failed update.
        (BootStatus::Checking, BootImage::Factory | BootImage::Custom) => roll_back(),

        // The application explicitly reported the custom image bad.
        // Identical handling to `Checking`, spelled out on its own arm.
        (BootStatus::Err, BootImage::Factory | BootImage::Custom) => roll_back(),

        // Either word is out of range: the record is corrupt. Do not
        // guess, wipe it and start over from defaults.
        _ => Decision {
            persist: None,
            action: Action::SelfHeal,
        },
    }
}
