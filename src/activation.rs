// comptr/src/activation.rs
//
//! Object activation policy.

use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

bitflags! {
    /// Execution contexts in which the object broker may activate a class.
    pub struct ClsCtx: u32 {
        /// Server code runs in the caller's own process.
        const INPROC_SERVER = 0x1;
        /// An in-process handler for an object running elsewhere.
        const INPROC_HANDLER = 0x2;
        /// A separate server process on the local machine.
        const LOCAL_SERVER = 0x4;
        /// A server process on a remote machine.
        const REMOTE_SERVER = 0x10;
        /// Any server context.
        const SERVER =
            Self::INPROC_SERVER.bits | Self::LOCAL_SERVER.bits | Self::REMOTE_SERVER.bits;
        /// Any context at all.
        const ALL = Self::SERVER.bits | Self::INPROC_HANDLER.bits;
    }
}

// Out-of-process activation, matching the default of the callers this
// wrapper was written for. Environment-specific rather than an invariant,
// hence configurable.
static DEFAULT_CLASS_CONTEXT: AtomicU32 = AtomicU32::new(ClsCtx::LOCAL_SERVER.bits);

/// Returns the context flags [`ComPtr::create_instance`] activates under.
///
/// [`ComPtr::create_instance`]: crate::ComPtr
pub fn default_class_context() -> ClsCtx {
    ClsCtx::from_bits_truncate(DEFAULT_CLASS_CONTEXT.load(Ordering::Relaxed))
}

/// Replaces the process-wide default activation context.
pub fn set_default_class_context(context: ClsCtx) {
    debug!("default activation context set to {:?}", context);
    DEFAULT_CLASS_CONTEXT.store(context.bits, Ordering::Relaxed);
}
