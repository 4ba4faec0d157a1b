//! C entry points called by the recompiled game
//!
//! Every function has the runtime's `void (uint8_t* rdram, recomp_context* ctx)`
//! shape. Results go back through `v0`; nothing here ever unwinds into the
//! host.
#![allow(unsafe_code)]

use std::panic::{self, AssertUnwindSafe};

use bkdialog::TextId;
use bkdialog::cache::SLOT_SIZE;

use crate::logging;
use crate::recomp::{GuestPtr, Rdram, RecompContext, arg, arg_path, set_return};
use crate::state::with_loader;

/// Mod API revision the runtime checks before binding the exports
#[allow(non_upper_case_globals)]
#[unsafe(no_mangle)]
pub static recomp_api_version: u32 = 1;

/// Shared wrapper for all entry points.
///
/// Installs logging, rejects null pointers, contains panics and writes the
/// body's result to `v0` (0 if the body panicked).
///
/// # Safety
///
/// `rdram` must point to the runtime's RDRAM buffer and `ctx` to the calling
/// thread's register context, both valid for the duration of the call.
unsafe fn dispatch(
    name: &str,
    rdram: *mut u8,
    ctx: *mut RecompContext,
    body: impl FnOnce(&mut Rdram<'_>, &RecompContext) -> i32,
) {
    logging::init();

    if rdram.is_null() || ctx.is_null() {
        tracing::error!("{} called with a null rdram or context pointer", name);
        return;
    }

    // SAFETY: non-null and valid per the caller's contract
    let ctx = unsafe { &mut *ctx };
    // SAFETY: as above; the runtime does not touch RDRAM while we run
    let mut mem = unsafe { Rdram::from_raw(rdram) };

    let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut mem, &*ctx)));
    let ret = result.unwrap_or_else(|_| {
        tracing::error!("{} panicked, returning 0", name);
        0
    });
    set_return(ctx, ret);
}

/// `DialogLoader_SetModsFolderPath(const char* path)`
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_SetModsFolderPath(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe {
        dispatch("DialogLoader_SetModsFolderPath", rdram, ctx, |mem, ctx| {
            match arg_path::<0>(mem, ctx) {
                Ok(path) => {
                    let level = with_loader(|loader| {
                        loader.set_mod_root(path);
                        loader.config().log_level.clone()
                    });
                    logging::set_level(&level);
                }
                Err(e) => tracing::error!("Invalid mods folder path: {}", e),
            }
            0
        });
    }
}

/// `DialogLoader_RefreshAll()`
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_RefreshAll(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe {
        dispatch("DialogLoader_RefreshAll", rdram, ctx, |_, _| {
            with_loader(|loader| {
                loader.refresh_all();
            });
            0
        });
    }
}

/// `DialogLoader_RefreshDialog(s32 text_id)`
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_RefreshDialog(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe {
        dispatch("DialogLoader_RefreshDialog", rdram, ctx, |_, ctx| {
            let id = TextId(arg::<0, i32>(ctx));
            with_loader(|loader| {
                loader.refresh_dialog(id);
            });
            0
        });
    }
}

/// `DialogLoader_GetDialog(s32 text_id, u8* dest)`
///
/// Copies the full 4 KiB slot to `dest` and returns 1, or returns 0 without
/// writing when nothing is cached for `text_id`.
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_GetDialog(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe {
        dispatch("DialogLoader_GetDialog", rdram, ctx, |mem, ctx| {
            let id = TextId(arg::<0, i32>(ctx));
            let dest_ptr = arg::<1, GuestPtr>(ctx);
            with_loader(|loader| {
                if !loader.cache().contains(id) {
                    return 0;
                }
                match mem.array_mut::<SLOT_SIZE>(dest_ptr) {
                    Ok(dest) => i32::from(loader.get_dialog(id, dest)),
                    Err(e) => {
                        tracing::warn!("Cannot copy dialog {}: {}", id, e);
                        0
                    }
                }
            })
        });
    }
}

/// `DialogLoader_RefreshQuizQ(s32 quiz_id)`
///
/// Quiz tables are not loaded yet; the entry point is kept so mods can bind it.
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_RefreshQuizQ(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe {
        dispatch("DialogLoader_RefreshQuizQ", rdram, ctx, |_, ctx| {
            tracing::debug!("Quiz question {} refresh ignored", arg::<0, i32>(ctx));
            0
        });
    }
}

/// `DialogLoader_GetQuizQ(s32 quiz_id, u8* dest)`
///
/// Always a miss.
///
/// # Safety
///
/// See [`dispatch`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DialogLoader_GetQuizQ(rdram: *mut u8, ctx: *mut RecompContext) {
    unsafe { dispatch("DialogLoader_GetQuizQ", rdram, ctx, |_, _| 0) };
}
