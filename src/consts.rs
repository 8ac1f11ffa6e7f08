/// Path of the boot record in the storage service's root directory.
pub const BOOT_CFG_PATH: &str = "boot.cfg";

/// Allocated capacity of the boot record slot. The payload is only
/// [`RECORD_LEN`] bytes; the rest stays reserved so the allocation
/// never needs resizing.
pub const BOOT_CFG_CAPACITY: usize = 512;

/// Serialized size of a boot record: two little-endian u32 words.
pub const RECORD_LEN: usize = 8;

pub const FACTORY_IMG_PATH: &str = "/sys/factory.bin";
pub const CUSTOM_IMG_PATH: &str = "/sys/custom.bin";

// NOTE: Make sure these stay in sync with the application linker script!
// Images are linked to run from EXEC_BASE_ADDR, and the region above it
// must hold the largest expected image.
pub const EXEC_BASE_ADDR: usize = 0x2000_4000;
pub const EXEC_REGION_LEN: usize = 0x0003_C000;

/// Byte length of the vector prefix every image must start with:
/// word 0 is the initial stack pointer, word 1 the entry address.
pub const VECTOR_LEN: usize = 8;
