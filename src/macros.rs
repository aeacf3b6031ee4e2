// comptr/src/macros.rs
//
//! Macros.

/// Declares a COM interface against this crate's ABI layer.
///
/// Expands to the `#[repr(C)]` call-table struct (with the parent's table
/// embedded as its first field), the interface struct itself, unsafe
/// inherent thunks for the interface's own methods, a `Deref` impl to the
/// parent interface for the inherited methods, and an
/// [`Interface`](crate::Interface) impl carrying the declared identity.
///
/// Parameter lists use the call table's convention: every parameter is
/// followed by a comma, including the last.
///
/// ```ignore
/// com_interface! {
///     #[uuid(0x3050f1ff, 0x98b5, 0x11cf, 0xbb, 0x82, 0x00, 0xaa, 0x00, 0xbd, 0xce, 0x0b)]
///     interface IExample(IExampleVtbl): IUnknown(IUnknownVtbl) {
///         fn Frobnicate(level: u32,) -> HRESULT,
///     }
/// }
/// ```
#[macro_export]
macro_rules! com_interface {
    (
        $(#[doc = $doc:expr])*
        #[uuid($d1:expr, $d2:expr, $d3:expr,
               $b0:expr, $b1:expr, $b2:expr, $b3:expr,
               $b4:expr, $b5:expr, $b6:expr, $b7:expr)]
        interface $interface:ident ($vtbl:ident) : $pinterface:ident ($pvtbl:ident) {
            $(fn $method:ident ($($p:ident : $t:ty,)*) -> $rtr:ty,)*
        }
    ) => {
        #[repr(C)]
        #[allow(non_snake_case)]
        pub struct $vtbl {
            pub parent: $pvtbl,
            $(pub $method:
                unsafe extern "system" fn(This: *mut $interface, $($p: $t,)*) -> $rtr,)*
        }

        $(#[doc = $doc])*
        #[repr(C)]
        #[allow(non_snake_case)]
        pub struct $interface {
            pub lpVtbl: *const $vtbl,
        }

        #[allow(non_snake_case)]
        impl $interface {
            $(#[inline]
            pub unsafe fn $method(&self, $($p: $t,)*) -> $rtr {
                ((*self.lpVtbl).$method)(self as *const Self as *mut Self, $($p,)*)
            })*
        }

        impl ::std::ops::Deref for $interface {
            type Target = $pinterface;
            #[inline]
            fn deref(&self) -> &$pinterface {
                unsafe { &*(self as *const Self as *const $pinterface) }
            }
        }

        unsafe impl $crate::Interface for $interface {
            #[inline]
            fn uuidof() -> $crate::Guid {
                $crate::Guid {
                    data1: $d1,
                    data2: $d2,
                    data3: $d3,
                    data4: [$b0, $b1, $b2, $b3, $b4, $b5, $b6, $b7],
                }
            }
        }
    };
}
