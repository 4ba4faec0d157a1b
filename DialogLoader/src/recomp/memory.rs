//! Guest memory access
//!
//! Guest code addresses RDRAM through KSEG0 (`0x80000000` upwards). The
//! registers hold those addresses sign-extended to 64 bits, so the host
//! offset is `sign_extend(ptr) - 0xFFFFFFFF80000000`.
//!
//! Byte-sized guest accesses go through `address ^ 3`: the runtime keeps RDRAM
//! as native-endian 32-bit words, so a big-endian byte stream is reversed
//! within each word.
#![allow(unsafe_code)]

use thiserror::Error;

/// Sign-extended KSEG0 base address
pub const KSEG0_BASE: u64 = 0xFFFF_FFFF_8000_0000;

/// Size of the emulated RDRAM (8 MiB with the Expansion Pak)
pub const RDRAM_SIZE: usize = 0x80_0000;

/// Errors raised while touching guest memory
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BridgeError {
    /// The requested range does not fit inside RDRAM.
    #[error("guest range 0x{ptr:08X}+0x{len:X} is outside RDRAM")]
    OutOfRange {
        /// Guest address of the range start.
        ptr: u32,
        /// Length of the range in bytes.
        len: usize,
    },

    /// No NUL byte before the end of RDRAM.
    #[error("string at guest address 0x{0:08X} is not NUL-terminated")]
    UnterminatedString(u32),
}

/// A 32-bit guest virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuestPtr(pub u32);

impl GuestPtr {
    /// Take the low 32 bits of a register value
    pub fn from_gpr(raw: u64) -> Self {
        Self(raw as u32)
    }

    /// The address as the register holds it
    pub fn sign_extended(self) -> u64 {
        i64::from(self.0 as i32) as u64
    }

    /// Host offset of this address from the start of RDRAM
    pub fn host_offset(self) -> u64 {
        self.sign_extended().wrapping_sub(KSEG0_BASE)
    }
}

/// View over the host-side RDRAM buffer
pub struct Rdram<'a> {
    bytes: &'a mut [u8],
}

impl<'a> Rdram<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Wrap the runtime's RDRAM base pointer.
    ///
    /// # Safety
    ///
    /// `base` must be valid for reads and writes of [`RDRAM_SIZE`] bytes and
    /// must not be accessed through any other path while the view lives.
    pub unsafe fn from_raw(base: *mut u8) -> Self {
        // SAFETY: upheld by the caller
        let bytes = unsafe { std::slice::from_raw_parts_mut(base, RDRAM_SIZE) };
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn range(&self, ptr: GuestPtr, len: usize) -> Result<std::ops::Range<usize>, BridgeError> {
        let out_of_range = || BridgeError::OutOfRange { ptr: ptr.0, len };
        let start = usize::try_from(ptr.host_offset()).map_err(|_| out_of_range())?;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        if end > self.bytes.len() {
            return Err(out_of_range());
        }
        Ok(start..end)
    }

    /// Host bytes backing `len` guest bytes at `ptr` (no byte swizzling)
    pub fn slice(&self, ptr: GuestPtr, len: usize) -> Result<&[u8], BridgeError> {
        let range = self.range(ptr, len)?;
        Ok(&self.bytes[range])
    }

    /// Mutable host bytes backing `len` guest bytes at `ptr` (no byte swizzling)
    pub fn slice_mut(&mut self, ptr: GuestPtr, len: usize) -> Result<&mut [u8], BridgeError> {
        let range = self.range(ptr, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Fixed-size mutable view, e.g. a destination buffer for a blob slot
    pub fn array_mut<const N: usize>(&mut self, ptr: GuestPtr) -> Result<&mut [u8; N], BridgeError> {
        let slice = self.slice_mut(ptr, N)?;
        slice
            .try_into()
            .map_err(|_| BridgeError::OutOfRange { ptr: ptr.0, len: N })
    }

    fn byte_index(&self, ptr: GuestPtr, offset: u32) -> Result<usize, BridgeError> {
        let address = ptr.sign_extended().wrapping_add(u64::from(offset)) ^ 3;
        let index = address.wrapping_sub(KSEG0_BASE);
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.bytes.len())
            .ok_or(BridgeError::OutOfRange {
                ptr: ptr.0.wrapping_add(offset),
                len: 1,
            })
    }

    /// Read the guest byte at `ptr + offset`
    pub fn read_u8(&self, ptr: GuestPtr, offset: u32) -> Result<u8, BridgeError> {
        let index = self.byte_index(ptr, offset)?;
        Ok(self.bytes[index])
    }

    /// Write the guest byte at `ptr + offset`
    pub fn write_u8(&mut self, ptr: GuestPtr, offset: u32, value: u8) -> Result<(), BridgeError> {
        let index = self.byte_index(ptr, offset)?;
        self.bytes[index] = value;
        Ok(())
    }

    /// Read a NUL-terminated guest string (without the terminator)
    pub fn read_c_string(&self, ptr: GuestPtr) -> Result<Vec<u8>, BridgeError> {
        let mut out = Vec::new();
        for offset in 0u32.. {
            match self.read_u8(ptr, offset) {
                Ok(0) => return Ok(out),
                Ok(byte) => out.push(byte),
                Err(_) => break,
            }
        }
        Err(BridgeError::UnterminatedString(ptr.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_offset() {
        assert_eq!(GuestPtr(0x8000_0000).host_offset(), 0);
        assert_eq!(GuestPtr(0x8012_3450).host_offset(), 0x12_3450);
        assert_eq!(GuestPtr::from_gpr(0xFFFF_FFFF_8000_1000).host_offset(), 0x1000);
        // Addresses outside KSEG0 wrap far out of range
        assert!(GuestPtr(0x0000_1000).host_offset() > RDRAM_SIZE as u64);
    }

    #[test]
    fn test_slice_bounds() {
        let mut buf = vec![0u8; 64];
        let mut rdram = Rdram::new(&mut buf);
        assert_eq!(rdram.slice(GuestPtr(0x8000_0010), 16).unwrap().len(), 16);
        assert_eq!(
            rdram.slice(GuestPtr(0x8000_0038), 16).unwrap_err(),
            BridgeError::OutOfRange {
                ptr: 0x8000_0038,
                len: 16
            }
        );
        assert!(rdram.slice_mut(GuestPtr(0x1000), 1).is_err());
        let array: &mut [u8; 8] = rdram.array_mut(GuestPtr(0x8000_0000)).unwrap();
        array[0] = 7;
        assert_eq!(buf[0], 7);
    }

    #[test]
    fn test_byte_access_is_word_swizzled() {
        let mut buf = vec![0u8; 16];
        let mut rdram = Rdram::new(&mut buf);
        for (i, b) in b"abcdef".iter().enumerate() {
            rdram.write_u8(GuestPtr(0x8000_0000), i as u32, *b).unwrap();
        }
        assert_eq!(rdram.read_u8(GuestPtr(0x8000_0000), 4).unwrap(), b'e');
        assert_eq!(&buf[..8], b"dcba\0\0fe");
    }

    #[test]
    fn test_read_c_string() {
        let mut buf = vec![0u8; 32];
        let mut rdram = Rdram::new(&mut buf);
        for (i, b) in b"mods/".iter().enumerate() {
            rdram.write_u8(GuestPtr(0x8000_0004), i as u32, *b).unwrap();
        }
        assert_eq!(rdram.read_c_string(GuestPtr(0x8000_0004)).unwrap(), b"mods/");

        let mut full = vec![b'x'; 8];
        let rdram = Rdram::new(&mut full);
        assert_eq!(
            rdram.read_c_string(GuestPtr(0x8000_0000)).unwrap_err(),
            BridgeError::UnterminatedString(0x8000_0000)
        );
    }
}
