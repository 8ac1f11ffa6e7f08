//! The two ways out of the boot selector, neither of which returns.

/// Transfers control into a loaded image.
pub trait Handoff {
    /// Start executing the image at `base`: load the stack pointer from
    /// word 0, branch to the address in word 1, and discard the current
    /// execution context for good.
    ///
    /// Never returns; the never type makes code after a call
    /// unreachable at the language level, so there is no silent
    /// fall-through path to guard.
    ///
    /// # Safety
    ///
    /// `base` must point at a complete image whose first two words are
    /// a valid initial stack pointer and entry address.
    unsafe fn transfer(&mut self, base: usize) -> !;
}

/// Unconditional device reset, the fail-stop reaction to every
/// unrecoverable error.
pub trait Reset {
    fn hard_reset(&mut self) -> !;
}

#[cfg(target_arch = "arm")]
mod cortex_m_impl {
    use super::{Handoff, Reset};
    use cortex_m::peripheral::SCB;

    /// The real thing for Cortex-M parts.
    pub struct CortexM;

    impl Handoff for CortexM {
        unsafe fn transfer(&mut self, base: usize) -> ! {
            cortex_m::asm::bootload(base as *const u32)
        }
    }

    impl Reset for CortexM {
        fn hard_reset(&mut self) -> ! {
            SCB::sys_reset()
        }
    }
}

#[cfg(target_arch = "arm")]
pub use cortex_m_impl::CortexM;
