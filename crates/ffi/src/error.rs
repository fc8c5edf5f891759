use fire_danger_core::FireDangerError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Error as seen from the C side: a code plus a diagnostic message.
pub(crate) trait FfiError {
    /// Code returned across the FFI boundary.
    fn code(&self) -> FireDangerErrorCode;

    /// Human-readable message stored for `fire_danger_get_last_error`.
    fn msg(&self) -> &str;
}

/// Plain code/message pair used for boundary failures and converted model errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: FireDangerErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// A required pointer argument was null.
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireDangerErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireDangerErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> FireDangerErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<FireDangerError> for DefaultFfiError {
    fn from(error: FireDangerError) -> Self {
        let code = match &error {
            FireDangerError::InvalidDimensions { .. } | FireDangerError::InputShape { .. } => {
                FireDangerErrorCode::InputShape
            }
            FireDangerError::UnknownFuelType { .. } => FireDangerErrorCode::UnknownFuelType,
            FireDangerError::InvalidRule { .. } => FireDangerErrorCode::InvalidRule,
            FireDangerError::InvalidScenario { .. } => FireDangerErrorCode::InvalidScenario,
            FireDangerError::InvalidParameter { .. } => FireDangerErrorCode::InvalidParameter,
            FireDangerError::Domain(_) => FireDangerErrorCode::Domain,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// Status codes returned by the fire danger entry points.
/// 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDangerErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid argument, e.g. a grid whose cell count overflows or a vegetation
    /// value outside its range.
    InvalidParameter = 2,

    /// Buffer length does not match the grid dimensions.
    InputShape = 3,

    /// Fuel code outside 1-6.
    UnknownFuelType = 4,

    /// Climate value outside its valid range or not finite.
    InvalidScenario = 5,

    /// Drought or moisture term undefined for the given climate.
    Domain = 6,

    /// Reclassification rule with `low > high`.
    InvalidRule = 7,
}

impl From<DefaultFfiError> for FireDangerErrorCode {
    fn from(error: DefaultFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent error on this thread (message, code).
    /// The `CString` is owned here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FireDangerErrorCode)> =
        const { RefCell::new((None, FireDangerErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireDangerErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireDangerErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Message of the most recent failed call on this thread.
///
/// Returns null if the last call succeeded. The pointer stays valid until the
/// next fire danger call on the same thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FireDangerErrorCode err = fire_danger_run(&grid, &climate, &outputs);
/// if (err != Ok) {
///     const char* error = fire_danger_get_last_error();
///     if (error) {
///         fprintf(stderr, "fire danger run failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_danger_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Code of the most recent call on this thread (`Ok` after a success).
#[no_mangle]
pub extern "C" fn fire_danger_get_last_error_code() -> FireDangerErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let error: DefaultFfiError = FireDangerError::UnknownFuelType { code: 9, index: 3 }.into();
        assert_eq!(error.code(), FireDangerErrorCode::UnknownFuelType);
        assert!(error.msg().contains('9'));

        let error: DefaultFfiError = FireDangerError::InvalidDimensions {
            width: 2,
            height: 2,
            len: 3,
        }
        .into();
        assert_eq!(error.code(), FireDangerErrorCode::InputShape);

        let error: DefaultFfiError = FireDangerError::InvalidParameter {
            parameter: fire_danger_core::VegetationParameter::Biomass,
            value: -3.0,
            reason: "must not be negative",
        }
        .into();
        assert_eq!(error.code(), FireDangerErrorCode::InvalidParameter);

        let error: DefaultFfiError = FireDangerError::Domain("T = -6".to_string()).into();
        assert_eq!(FireDangerErrorCode::from(error), FireDangerErrorCode::Domain);
    }

    #[test]
    fn test_null_pointer_message_names_parameter() {
        let error = DefaultFfiError::null_pointer("outputs");
        assert_eq!(error.code(), FireDangerErrorCode::NullPointer);
        assert_eq!(error.msg(), "Parameter 'outputs' cannot be null");
    }
}
