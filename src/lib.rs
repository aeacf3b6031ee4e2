//! Reference-counted ownership of COM interface pointers.
//!
//! COM objects keep their own reference count behind the three root
//! call-table slots every interface shares (`QueryInterface`, `AddRef`,
//! `Release`). [`ComPtr`] binds that contract to Rust ownership: acquiring
//! a handle takes one unit of the external count, dropping the handle gives
//! the unit back exactly once, and interface discovery and object
//! activation become checked operations that return the platform's status
//! codes unmodified. Calling code never balances `AddRef`/`Release` by
//! hand. This is in contrast to crates that *implement* COM objects; here
//! the object, its count, and its call dispatch all belong to the other
//! side of the ABI, and the crate only manages the one reference it holds.
//!
//! The wrapper is generic over a small capability layer — an interface's
//! fixed identity ([`Interface`], [`Guid`]) and the root call table
//! ([`IUnknown`]) — declared portably in this crate, so the ownership
//! semantics build and are tested on every target. The pieces that talk to
//! a live object broker (`CoCreateInstance`, apartment management) are
//! bound in the `platform::windows` module on Windows only.

#[macro_use]
extern crate bitflags;

#[macro_use]
mod macros;

mod activation;
pub use crate::activation::{default_class_context, set_default_class_context, ClsCtx};

mod com;
pub use crate::com::ComPtr;

pub mod error;
pub use crate::error::{failed, succeeded, HRESULT};

pub mod platform;

mod unknown;
pub use crate::unknown::{Guid, IUnknown, IUnknownVtbl, Interface, IID_IUNKNOWN};
