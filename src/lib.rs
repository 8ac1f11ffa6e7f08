#![no_std]

//! Power-loss-safe boot selector for dual-image (factory/custom)
//! devices.
//!
//! On every cold boot a single persisted record decides which image to
//! load and run. A staged custom image gets exactly one unconfirmed
//! attempt: the record is flipped to `Checking` *before* the attempt,
//! so a crash anywhere in between rolls back to the factory image on
//! the next boot. The storage service and the non-returning exits are
//! collaborator traits; see [`selector::boot`] for the entry point a
//! board crate wires up.

#[cfg(test)]
extern crate std;

#[macro_use]
pub mod log;

pub mod boot_machine;
pub mod consts;
pub mod handoff;
pub mod loader;
pub mod record;
pub mod record_store;
pub mod selector;
pub mod storage;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "defmt-log")]
mod defmt {
    use core::sync::atomic::{AtomicUsize, Ordering};
    use defmt_rtt as _; // global logger
    use panic_probe as _;

    // same panicking *behavior* as `panic-probe` but doesn't print a panic message
    // this prevents the panic message being printed *twice* when `defmt::panic` is invoked
    #[defmt::panic_handler]
    fn panic() -> ! {
        cortex_m::asm::udf()
    }

    static COUNT: AtomicUsize = AtomicUsize::new(0);

    defmt::timestamp!("{=usize}", {
        // NOTE(no-CAS) `timestamps` runs with interrupts disabled
        let n = COUNT.load(Ordering::Relaxed);
        COUNT.store(n + 1, Ordering::Relaxed);
        n
    });
}

#[cfg(all(feature = "panic-reset", target_arch = "arm"))]
use panic_reset as _;
