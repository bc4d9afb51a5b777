// C entry points for the host keyboard service.
// The caller owns an opaque engine handle; every call guards against panics.
use crate::config::EngineConfig;
use crate::core::engine::AutocorrectEngine;
use crate::core::types::TouchZone;
use crate::loader::WordSource;
use log::error;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::ptr;
use std::sync::Arc;

pub struct EngineHandle {
    engine: Arc<AutocorrectEngine>,
}

unsafe fn str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

unsafe fn engine<'a>(handle: *const EngineHandle) -> Option<&'a AutocorrectEngine> {
    handle.as_ref().map(|h| h.engine.as_ref())
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

/// Opens an engine and starts loading `word_list_path` in the background.
/// `config_json` may be null for defaults. Returns null on failure.
#[no_mangle]
pub extern "C" fn autocorrect_engine_open(config_json: *const c_char, word_list_path: *const c_char) -> *mut EngineHandle {
    let result = catch_unwind(AssertUnwindSafe(|| {
        let config = match unsafe { str_arg(config_json) } {
            Some(json) => match EngineConfig::from_json(json) {
                Ok(config) => config,
                Err(e) => {
                    error!("Invalid engine config: {}", e);
                    return ptr::null_mut();
                }
            },
            None => EngineConfig::default(),
        };
        let engine = AutocorrectEngine::open(config);
        if let Some(path) = unsafe { str_arg(word_list_path) } {
            if let Err(e) = engine.start_loading(WordSource::Path(PathBuf::from(path))) {
                error!("Could not start lexicon load: {}", e);
            }
        }
        Box::into_raw(Box::new(EngineHandle { engine }))
    }));
    result.unwrap_or_else(|_| {
        error!("Panic during engine initialization");
        ptr::null_mut()
    })
}

/// Saves the snapshot (if configured) and frees the handle.
#[no_mangle]
pub extern "C" fn autocorrect_engine_close(handle: *mut EngineHandle) {
    if handle.is_null() {
        return;
    }
    let handle = unsafe { Box::from_raw(handle) };
    let _ = catch_unwind(AssertUnwindSafe(|| {
        if let Err(e) = handle.engine.close() {
            error!("Failed to close engine: {}", e);
        }
    }));
}

#[no_mangle]
pub extern "C" fn autocorrect_is_ready(handle: *const EngineHandle) -> bool {
    catch_unwind(AssertUnwindSafe(|| unsafe { engine(handle) }.map_or(false, |e| e.is_ready()))).unwrap_or(false)
}

/// JSON array of completions. Free with `autocorrect_free_string`.
#[no_mangle]
pub extern "C" fn autocorrect_suggest_prefix(handle: *const EngineHandle, prefix: *const c_char) -> *mut c_char {
    let json = catch_unwind(AssertUnwindSafe(|| {
        let suggestions = match (unsafe { engine(handle) }, unsafe { str_arg(prefix) }) {
            (Some(engine), Some(prefix)) => engine.suggest_prefix(prefix),
            _ => vec![],
        };
        serde_json::to_string(&suggestions).unwrap_or_else(|_| "[]".to_string())
    }))
    .unwrap_or_else(|_| "[]".to_string());
    into_c_string(json)
}

/// Corrected word, or null when no correction applies.
#[no_mangle]
pub extern "C" fn autocorrect_correct(handle: *const EngineHandle, word: *const c_char, cursor_position: i64) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        let engine = unsafe { engine(handle) }?;
        let word = unsafe { str_arg(word) }?;
        engine.correct(word, cursor_position)
    }))
    .ok()
    .flatten()
    .map_or(ptr::null_mut(), into_c_string)
}

/// `zones` holds one zone index (0 = top-left .. 8 = bottom-right) per
/// character of `word`; unknown indexes count as centre.
#[no_mangle]
pub extern "C" fn autocorrect_correct_with_touch_zones(
    handle: *const EngineHandle,
    word: *const c_char,
    zones: *const u8,
    zones_len: usize,
    cursor_position: i64,
) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        let engine = unsafe { engine(handle) }?;
        let word = unsafe { str_arg(word) }?;
        let raw: &[u8] = if zones.is_null() { &[] } else { unsafe { std::slice::from_raw_parts(zones, zones_len) } };
        let zones: Vec<TouchZone> = raw
            .iter()
            .map(|&z| TouchZone::from_index(z).unwrap_or(TouchZone::Center))
            .collect();
        engine.correct_with_touch_zones(word, &zones, cursor_position)
    }))
    .ok()
    .flatten()
    .map_or(ptr::null_mut(), into_c_string)
}

#[no_mangle]
pub extern "C" fn autocorrect_is_known(handle: *const EngineHandle, word: *const c_char) -> bool {
    catch_unwind(AssertUnwindSafe(|| match (unsafe { engine(handle) }, unsafe { str_arg(word) }) {
        (Some(engine), Some(word)) => engine.is_known(word),
        _ => false,
    }))
    .unwrap_or(false)
}

/// JSON object of the correction record for `corrected` (or the most recent
/// one when null), or null if there is none.
#[no_mangle]
pub extern "C" fn autocorrect_last_correction(handle: *const EngineHandle, corrected: *const c_char) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        let engine = unsafe { engine(handle) }?;
        let record = engine.last_correction(unsafe { str_arg(corrected) })?;
        serde_json::to_string(&record).ok()
    }))
    .ok()
    .flatten()
    .map_or(ptr::null_mut(), into_c_string)
}

#[no_mangle]
pub extern "C" fn autocorrect_clear_correction(handle: *const EngineHandle, corrected: *const c_char) {
    let _ = catch_unwind(AssertUnwindSafe(|| {
        if let (Some(engine), Some(word)) = (unsafe { engine(handle) }, unsafe { str_arg(corrected) }) {
            engine.clear_correction(word);
        }
    }));
}

#[no_mangle]
pub extern "C" fn autocorrect_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}
