//! Argument and return-value marshalling
//!
//! Follows the o32 convention as the recompiler uses it: integer and pointer
//! arguments in `a0`-`a3`, a leading float in `f12`, integer results in `v0`
//! and float results in `f0`.
//!
//! Unsupported shapes are rejected when the entry point is compiled: argument
//! indices past 3 and floats outside argument 0 fail a `const` assertion, and
//! 64-bit integers or pointer-to-pointer arguments simply have no
//! [`FromArg`] impl.

use std::path::PathBuf;

use super::context::{FREG_F0, FREG_F12, REG_A0, REG_V0, RecompContext};
use super::memory::{BridgeError, GuestPtr, Rdram};

/// Number of register-passed arguments that can be read
pub const MAX_ARGS: usize = 4;

/// A value that can be read from argument register `N`
pub trait FromArg: Sized {
    fn from_arg<const N: usize>(ctx: &RecompContext) -> Self;
}

impl FromArg for i32 {
    fn from_arg<const N: usize>(ctx: &RecompContext) -> Self {
        ctx.r[REG_A0 + N] as i32
    }
}

impl FromArg for u32 {
    fn from_arg<const N: usize>(ctx: &RecompContext) -> Self {
        ctx.r[REG_A0 + N] as u32
    }
}

impl FromArg for GuestPtr {
    fn from_arg<const N: usize>(ctx: &RecompContext) -> Self {
        GuestPtr::from_gpr(ctx.r[REG_A0 + N])
    }
}

impl FromArg for f32 {
    fn from_arg<const N: usize>(ctx: &RecompContext) -> Self {
        const { assert!(N == 0, "floats are only supported in arg 0") };
        ctx.f[FREG_F12].fl()
    }
}

/// Read argument `N` as `T`
pub fn arg<const N: usize, T: FromArg>(ctx: &RecompContext) -> T {
    const { assert!(N < MAX_ARGS, "only args 0 through 3 are supported") };
    T::from_arg::<N>(ctx)
}

/// Read argument `N` as a guest pointer to a NUL-terminated string.
///
/// Invalid UTF-8 is replaced with U+FFFD and logged.
pub fn arg_string<const N: usize>(rdram: &Rdram<'_>, ctx: &RecompContext) -> Result<String, BridgeError> {
    let ptr: GuestPtr = arg::<N, GuestPtr>(ctx);
    let bytes = rdram.read_c_string(ptr)?;
    Ok(lossy_string(ptr, bytes))
}

/// Read argument `N` as a guest pointer to a NUL-terminated path.
///
/// On Unix the bytes are kept as-is; elsewhere they must be UTF-8 and are
/// converted like [`arg_string`].
pub fn arg_path<const N: usize>(rdram: &Rdram<'_>, ctx: &RecompContext) -> Result<PathBuf, BridgeError> {
    let ptr: GuestPtr = arg::<N, GuestPtr>(ctx);
    let bytes = rdram.read_c_string(ptr)?;

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStringExt;
        Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
    }
    #[cfg(not(unix))]
    {
        Ok(PathBuf::from(lossy_string(ptr, bytes)))
    }
}

fn lossy_string(ptr: GuestPtr, bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(
            "String at guest address 0x{:08X} is not valid UTF-8: {}",
            ptr.0,
            e.utf8_error()
        );
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

/// A value that can be written to the return register
pub trait IntoReturn {
    fn write_return(self, ctx: &mut RecompContext);
}

impl IntoReturn for i32 {
    fn write_return(self, ctx: &mut RecompContext) {
        ctx.r[REG_V0] = i64::from(self) as u64;
    }
}

impl IntoReturn for u32 {
    fn write_return(self, ctx: &mut RecompContext) {
        (self as i32).write_return(ctx);
    }
}

impl IntoReturn for f32 {
    fn write_return(self, ctx: &mut RecompContext) {
        ctx.f[FREG_F0].set_fl(self);
    }
}

/// Store `value` in the return register
pub fn set_return<T: IntoReturn>(ctx: &mut RecompContext, value: T) {
    value.write_return(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_args() {
        let mut ctx = RecompContext::new();
        ctx.r[4] = 0xFFFF_FFFF_FFFF_FFFE;
        ctx.r[5] = 0x0000_0000_0000_0C5E;
        ctx.r[7] = 0x1_2345_6789;
        assert_eq!(arg::<0, i32>(&ctx), -2);
        assert_eq!(arg::<1, i32>(&ctx), 0x0C5E);
        assert_eq!(arg::<3, u32>(&ctx), 0x2345_6789);
    }

    #[test]
    fn test_pointer_and_float_args() {
        let mut ctx = RecompContext::new();
        ctx.r[5] = 0xFFFF_FFFF_8010_0000;
        ctx.f[12].set_fl(0.25);
        assert_eq!(arg::<1, GuestPtr>(&ctx), GuestPtr(0x8010_0000));
        assert_eq!(arg::<0, f32>(&ctx).to_bits(), 0.25f32.to_bits());
    }

    #[test]
    fn test_string_arg() {
        let mut buf = vec![0u8; 64];
        let mut rdram = Rdram::new(&mut buf);
        for (i, b) in b"C:/mods".iter().enumerate() {
            rdram.write_u8(GuestPtr(0x8000_0010), i as u32, *b).unwrap();
        }
        let mut ctx = RecompContext::new();
        ctx.r[4] = GuestPtr(0x8000_0010).sign_extended();
        assert_eq!(arg_string::<0>(&rdram, &ctx).unwrap(), "C:/mods");
    }

    #[test]
    fn test_non_utf8_string_arg() {
        let mut buf = vec![0u8; 64];
        let mut rdram = Rdram::new(&mut buf);
        for (i, b) in b"mods/\xE9t\xE9".iter().enumerate() {
            rdram.write_u8(GuestPtr(0x8000_0000), i as u32, *b).unwrap();
        }
        let mut ctx = RecompContext::new();
        ctx.r[4] = GuestPtr(0x8000_0000).sign_extended();

        assert_eq!(arg_string::<0>(&rdram, &ctx).unwrap(), "mods/\u{FFFD}t\u{FFFD}");

        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            let path = arg_path::<0>(&rdram, &ctx).unwrap();
            assert_eq!(path.as_os_str().as_bytes(), b"mods/\xE9t\xE9");
        }
    }

    #[test]
    fn test_returns() {
        let mut ctx = RecompContext::new();
        set_return(&mut ctx, -1i32);
        assert_eq!(ctx.r[2], u64::MAX);
        set_return(&mut ctx, 1u32);
        assert_eq!(ctx.r[2], 1);
        set_return(&mut ctx, 2.0f32);
        assert_eq!(ctx.f[0].fl().to_bits(), 2.0f32.to_bits());
    }
}
