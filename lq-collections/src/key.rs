//! Link type for list nodes.
//!
//! Nodes refer to each other by storage key rather than by pointer. The
//! reserved [`Key::NONE`] value addresses the list's sentinel: a node whose
//! `next` is `NONE` is the last node, a node whose `prev` is `NONE` is the
//! first.

/// A copyable storage key with a reserved sentinel value.
///
/// # Example
///
/// ```
/// use lq_collections::Key;
///
/// let key: usize = 42;
/// assert!(key.is_some());
/// assert!(usize::NONE.is_none());
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug + 'static {
    /// Sentinel value. Never handed out by storage as a real key.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Converts to `Option`, mapping the sentinel to `None`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
