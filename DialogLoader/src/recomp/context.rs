//! Register context handed over by the recompiled guest code
//!
//! Mirrors the host runtime's `recomp_context` layout. Only the argument
//! registers (`a0`-`a3`, `f12`) and return registers (`v0`, `f0`) are touched
//! here, but the whole struct is declared so the field offsets line up.

/// One MIPS general-purpose register, sign-extended to 64 bits
pub type Gpr = u64;

/// MIPS general-purpose register numbers used by the calling convention
pub const REG_V0: usize = 2;
pub const REG_A0: usize = 4;

/// Floating-point register numbers used by the calling convention
pub const FREG_F0: usize = 0;
pub const FREG_F12: usize = 12;

/// One floating-point register.
///
/// The runtime declares this as a union of a `double`, a `{ float fl; float fh; }`
/// pair and raw integers. On little-endian hosts `fl` is the low half of the
/// 64-bit value.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fpr {
    pub bits: u64,
}

impl Fpr {
    pub fn fl(self) -> f32 {
        f32::from_bits(self.bits as u32)
    }

    pub fn set_fl(&mut self, value: f32) {
        self.bits = (self.bits & 0xFFFF_FFFF_0000_0000) | u64::from(value.to_bits());
    }
}

/// The register file of the guest thread making the call
#[repr(C)]
#[derive(Debug)]
pub struct RecompContext {
    pub r: [Gpr; 32],
    pub f: [Fpr; 32],
    pub hi: u64,
    pub lo: u64,
    pub f_odd: *mut u32,
    pub status_reg: u32,
    pub mips3_float_mode: u8,
}

impl RecompContext {
    /// A zeroed context (used when driving entry points outside the runtime)
    pub fn new() -> Self {
        Self {
            r: [0; 32],
            f: [Fpr::default(); 32],
            hi: 0,
            lo: 0,
            f_odd: std::ptr::null_mut(),
            status_reg: 0,
            mips3_float_mode: 0,
        }
    }
}

impl Default for RecompContext {
    fn default() -> Self {
        Self::new()
    }
}
