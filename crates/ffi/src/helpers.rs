use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, FireDangerErrorCode};
use fire_danger_core::FireDangerError;
use std::ffi::CString;

/// Record failure details in the thread-local error slot.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> FireDangerErrorCode {
    set_last_error(error);
    error.code()
}

/// Record a model error (if any) and turn it into an FFI code.
pub(crate) fn track_result<T>(
    result: Result<T, FireDangerError>,
) -> Result<T, FireDangerErrorCode> {
    result.map_err(|error| track_error(&DefaultFfiError::from(error)))
}

/// Reset the error slot after a successful call.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireDangerErrorCode::Ok;
    });
}
