// comptr/src/platform/windows.rs
//
//! Bindings to the Windows object broker.

use std::os::raw::c_void;
use std::ptr;

use log::debug;
use winapi::shared::guiddef::GUID;
use winapi::um::combaseapi::{CoCreateInstance, CoInitializeEx, CoUninitialize};

use crate::activation::ClsCtx;
use crate::error::{self, HRESULT};
use crate::unknown::Guid;

/// Asks the object broker to instantiate `clsid` and store its `iid` facet
/// through `out`. The aggregation pointer is always omitted.
///
/// The portable `Guid` declaration is layout-identical to the platform's,
/// so the identities cross the FFI boundary by pointer cast.
pub(crate) unsafe fn co_create_instance(
    clsid: &Guid,
    context: ClsCtx,
    iid: &Guid,
    out: *mut *mut c_void,
) -> HRESULT {
    let hr = CoCreateInstance(
        clsid as *const Guid as *const GUID,
        ptr::null_mut(),
        context.bits(),
        iid as *const Guid as *const GUID,
        out,
    );
    if error::failed(hr) {
        debug!("CoCreateInstance failed: {:#010x}", hr);
    }
    hr
}

bitflags! {
    /// Concurrency models under which a thread can enter a COM apartment.
    pub struct CoInit: u32 {
        /// The multithreaded model (the value when no flags are set).
        const MULTITHREADED = 0x0;
        /// A single-threaded apartment.
        const APARTMENT_THREADED = 0x2;
        /// Disables DDE support for OLE1.
        const DISABLE_OLE1DDE = 0x4;
        /// Trades memory for speed.
        const SPEED_OVER_MEMORY = 0x8;
    }
}

/// Holds the calling thread inside a COM apartment.
///
/// Creating an `Apartment` initializes COM on the current thread under the
/// requested concurrency model, and dropping it leaves the apartment. If
/// the thread had already entered an apartment under a *different* model,
/// the guard still succeeds — the thread is usable for COM calls as-is —
/// but the apartment is not ours to tear down, so dropping the guard does
/// not uninitialize.
pub struct Apartment {
    owns_apartment: bool,
}

impl Apartment {
    /// Enters a COM apartment under the given concurrency model.
    ///
    /// The initialization call's status code is passed through unmodified
    /// on failure.
    pub fn new(model: CoInit) -> Result<Apartment, HRESULT> {
        let hr = unsafe { CoInitializeEx(ptr::null_mut(), model.bits()) };
        if error::succeeded(hr) {
            Ok(Apartment {
                owns_apartment: true,
            })
        } else if hr == error::RPC_E_CHANGED_MODE {
            debug!(
                "requested concurrency model {:#x} ignored; thread is already in an apartment",
                model.bits()
            );
            Ok(Apartment {
                owns_apartment: false,
            })
        } else {
            Err(hr)
        }
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        if self.owns_apartment {
            unsafe { CoUninitialize() }
        }
    }
}

struct ComInitialized {
    _apartment: Apartment,
}

thread_local! {
    // Multithreaded: this guard serves library threads with no message
    // pump. A thread that was put in a single-threaded apartment by its
    // owner is absorbed by Apartment's RPC_E_CHANGED_MODE handling.
    static COM_INITIALIZED: ComInitialized = match Apartment::new(CoInit::MULTITHREADED) {
        Ok(apartment) => ComInitialized {
            _apartment: apartment,
        },
        Err(hr) => panic!("failed to initialize COM: {:#010x}", hr),
    };
}

/// Ensures that COM stays initialized on the calling thread for the
/// thread's remaining lifetime.
///
/// Threads that need a particular apartment model should hold an
/// [`Apartment`] explicitly instead.
pub fn ensure_com_initialized() {
    COM_INITIALIZED.with(|_| {});
}
