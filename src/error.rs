// comptr/src/error.rs
//
//! Status codes returned by COM calls.

/// The host platform's signed 32-bit result code.
///
/// Zero or positive values indicate success; negative values indicate
/// failure, with bit patterns conveying facility and error codes. This crate
/// passes result codes through unmodified: fallible operations return them
/// in the `Err` position of a `Result`, and nothing is translated into a
/// local error type.
pub type HRESULT = i32;

/// Returns true if `hr` indicates success.
#[inline]
pub fn succeeded(hr: HRESULT) -> bool {
    hr >= 0
}

/// Returns true if `hr` indicates failure.
#[inline]
pub fn failed(hr: HRESULT) -> bool {
    hr < 0
}

/// The operation succeeded.
pub const S_OK: HRESULT = 0;
/// The operation succeeded with a negative or empty answer.
pub const S_FALSE: HRESULT = 1;
/// The requested operation is not implemented.
pub const E_NOTIMPL: HRESULT = 0x80004001u32 as HRESULT;
/// The object does not support the requested interface.
pub const E_NOINTERFACE: HRESULT = 0x80004002u32 as HRESULT;
/// An invalid (typically null) pointer was used.
pub const E_POINTER: HRESULT = 0x80004003u32 as HRESULT;
/// Unspecified failure.
pub const E_FAIL: HRESULT = 0x80004005u32 as HRESULT;
/// The class does not support aggregation.
pub const CLASS_E_NOAGGREGATION: HRESULT = 0x80040110u32 as HRESULT;
/// The class identity names no class registered with the object broker.
pub const REGDB_E_CLASSNOTREG: HRESULT = 0x80040154u32 as HRESULT;
/// COM has not been initialized on the calling thread.
pub const CO_E_NOTINITIALIZED: HRESULT = 0x800401F0u32 as HRESULT;
/// COM was already initialized on this thread under a different
/// concurrency model.
pub const RPC_E_CHANGED_MODE: HRESULT = 0x80010106u32 as HRESULT;
