// comptr/src/com.rs
//
//! An owned, reference-counted handle to a COM interface pointer.

use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::Deref;
use std::os::raw::c_void;
use std::ptr;

use crate::error::{self, HRESULT};
use crate::unknown::{Guid, IUnknown, Interface};

#[cfg(target_os = "windows")]
use crate::activation::{self, ClsCtx};
#[cfg(target_os = "windows")]
use crate::platform;

/// An owned handle to a reference-counted COM object, parameterized over
/// the interface it is held through.
///
/// A non-null handle accounts for exactly one unit of the wrapped object's
/// external reference count: the count is incremented when the handle
/// acquires a borrowed pointer and decremented exactly once when the handle
/// is released or dropped. The count itself lives inside the wrapped object;
/// this type never implements, inspects, or caches it, and adds no locking
/// of its own beyond what the object's own count provides.
///
/// A handle is never duplicated implicitly. Duplication goes through the
/// counted protocols only: [`clone`](Clone::clone), which increments the
/// count, or [`cast`](ComPtr::cast), which asks the object itself for
/// another facet.
pub struct ComPtr<T: Interface> {
    ptr: *mut T,
}

impl<T: Interface> ComPtr<T> {
    /// Creates an empty handle.
    #[inline]
    pub fn new() -> ComPtr<T> {
        ComPtr {
            ptr: ptr::null_mut(),
        }
    }

    /// Wraps `ptr`, taking over the one ownership unit it already carries.
    ///
    /// No count is incremented: this is the move-in convention for pointers
    /// returned fresh from factory and discovery calls.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live COM object carrying one
    /// ownership unit that the caller transfers to the handle.
    #[inline]
    pub unsafe fn from_raw(ptr: *mut T) -> ComPtr<T> {
        ComPtr { ptr }
    }

    /// Wraps `ptr`, incrementing the object's count by one.
    ///
    /// The copy-in convention: the caller keeps whatever claim it already
    /// had on `ptr`, and the handle acquires a unit of its own.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live COM object.
    pub unsafe fn from_raw_unowned(ptr: *mut T) -> ComPtr<T> {
        if !ptr.is_null() {
            (*(ptr as *mut IUnknown)).AddRef();
        }
        ComPtr { ptr }
    }

    /// Returns true if the handle is empty.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Returns the stored address without affecting ownership.
    ///
    /// The caller must neither release the pointer nor keep it beyond the
    /// handle's lifetime.
    #[inline]
    pub fn as_raw(&self) -> *mut T {
        self.ptr
    }

    /// Releases the held unit (if any), then stores `ptr` without
    /// incrementing its count.
    ///
    /// The asymmetry with [`from_raw_unowned`](ComPtr::from_raw_unowned) is
    /// deliberate: `attach` transfers an already-owned unit into the handle
    /// rather than creating a new one.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live COM object carrying one
    /// ownership unit that the caller transfers to the handle.
    pub unsafe fn attach(&mut self, ptr: *mut T) {
        self.release();
        self.ptr = ptr;
    }

    /// Consumes the handle without releasing, returning the raw pointer
    /// along with the ownership unit it carries.
    #[inline]
    pub fn into_raw(self) -> *mut T {
        let ptr = self.ptr;
        mem::forget(self);
        ptr
    }

    /// Returns the address of the handle's own storage slot, for ABI calls
    /// that populate an out parameter directly.
    ///
    /// Whatever the call writes through the slot is owned by the handle
    /// afterwards. Anything the slot held before is overwritten **without a
    /// release** — that is the wrapped ABI's out-parameter convention. It is
    /// the caller's obligation to pass the slot of an empty handle (or to
    /// call [`release`](ComPtr::release) first); otherwise the previously
    /// held unit leaks. The checked [`new_with`](ComPtr::new_with) wrapper
    /// avoids the edge entirely.
    ///
    /// # Safety
    ///
    /// Anything written through the slot must be null or a pointer carrying
    /// one ownership unit.
    #[inline]
    pub unsafe fn as_mut_ptr(&mut self) -> *mut *mut T {
        &mut self.ptr
    }

    /// Builds a handle from an out-parameter-style factory call.
    ///
    /// `f` receives the address of a null slot and returns the call's
    /// status code, which is passed through unmodified. On success the
    /// handle owns whatever the call wrote; on failure no handle is
    /// produced, and any pointer a misbehaving call left in the slot is
    /// released rather than leaked.
    ///
    /// # Safety
    ///
    /// A successful `f` must leave the slot null or populated with a
    /// pointer to a live `T` facet carrying one ownership unit.
    pub unsafe fn new_with<F>(f: F) -> Result<ComPtr<T>, HRESULT>
    where
        F: FnOnce(*mut *mut T) -> HRESULT,
    {
        let mut ptr = ptr::null_mut();
        let hr = f(&mut ptr);
        if error::succeeded(hr) {
            Ok(ComPtr::from_raw(ptr))
        } else {
            if !ptr.is_null() {
                (*(ptr as *mut IUnknown)).Release();
            }
            Err(hr)
        }
    }

    /// Like [`new_with`](ComPtr::new_with), for calls that take a requested
    /// interface identity alongside a type-erased out parameter.
    ///
    /// # Safety
    ///
    /// As for `new_with`; on success the call must have stored a pointer to
    /// the facet named by the identity it was given.
    pub unsafe fn new_with_uuid<F>(f: F) -> Result<ComPtr<T>, HRESULT>
    where
        F: FnOnce(&Guid, *mut *mut c_void) -> HRESULT,
    {
        ComPtr::new_with(|slot| f(&T::uuidof(), slot as *mut *mut c_void))
    }

    /// Asks the wrapped object for a different facet of itself.
    ///
    /// On success the new handle owns a unit of its own on the object; the
    /// source handle is unaffected either way. On failure the discovery
    /// call's status code is passed through and no handle is produced.
    /// Casting an empty handle fails with
    /// [`E_POINTER`](crate::error::E_POINTER) without any ABI call.
    pub fn cast<U: Interface>(&self) -> Result<ComPtr<U>, HRESULT> {
        if self.ptr.is_null() {
            return Err(error::E_POINTER);
        }
        let mut ptr = ptr::null_mut();
        let hr = unsafe { (*self.as_unknown()).QueryInterface(&U::uuidof(), &mut ptr) };
        if error::succeeded(hr) {
            Ok(unsafe { ComPtr::from_raw(ptr as *mut U) })
        } else {
            Err(hr)
        }
    }

    /// Releases the held ownership unit and empties the handle.
    ///
    /// Safe to call any number of times: once the handle is empty, further
    /// calls are no-ops. Dropping the handle does the same thing, on both
    /// normal and unwinding exits.
    pub fn release(&mut self) {
        let ptr = mem::replace(&mut self.ptr, ptr::null_mut());
        if !ptr.is_null() {
            unsafe {
                (*(ptr as *mut IUnknown)).Release();
            }
        }
    }

    #[inline]
    fn as_unknown(&self) -> *mut IUnknown {
        self.ptr as *mut IUnknown
    }
}

#[cfg(target_os = "windows")]
impl<T: Interface> ComPtr<T> {
    /// Asks the object broker to instantiate `clsid` and wraps the
    /// resulting `T` facet, activating under the process-wide
    /// [default context](crate::default_class_context).
    ///
    /// The activation call's status code is passed through unmodified; on
    /// failure no handle is produced. COM must already be initialized on
    /// the calling thread (see
    /// [`Apartment`](crate::platform::windows::Apartment) and
    /// [`ensure_com_initialized`](crate::platform::windows::ensure_com_initialized));
    /// activating without it fails with
    /// [`CO_E_NOTINITIALIZED`](crate::error::CO_E_NOTINITIALIZED).
    pub fn create_instance(clsid: &Guid) -> Result<ComPtr<T>, HRESULT> {
        ComPtr::create_instance_in(clsid, activation::default_class_context())
    }

    /// Like [`create_instance`](ComPtr::create_instance), activating in an
    /// explicit class context.
    pub fn create_instance_in(clsid: &Guid, context: ClsCtx) -> Result<ComPtr<T>, HRESULT> {
        unsafe {
            ComPtr::new_with_uuid(|iid, slot| {
                platform::windows::co_create_instance(clsid, context, iid, slot)
            })
        }
    }
}

impl<T: Interface> Clone for ComPtr<T> {
    /// Duplicates the handle, incrementing the object's count by one.
    fn clone(&self) -> ComPtr<T> {
        unsafe { ComPtr::from_raw_unowned(self.ptr) }
    }
}

impl<T: Interface> Default for ComPtr<T> {
    #[inline]
    fn default() -> ComPtr<T> {
        ComPtr::new()
    }
}

impl<T: Interface> Deref for ComPtr<T> {
    type Target = T;

    /// Panics if the handle is empty.
    fn deref(&self) -> &T {
        assert!(!self.ptr.is_null());
        unsafe { &*self.ptr }
    }
}

impl<T: Interface> Drop for ComPtr<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Interface> Debug for ComPtr<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ComPtr({:p})", self.ptr)
    }
}

impl<T: Interface> PartialEq for ComPtr<T> {
    fn eq(&self, other: &ComPtr<T>) -> bool {
        self.ptr == other.ptr
    }
}

impl<T: Interface> Eq for ComPtr<T> {}
