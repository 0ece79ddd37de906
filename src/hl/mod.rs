//! High-level interface to the MC33HB2001
//!
//! The entry point to this API is the [MC33HB2001] struct. Please refer to
//! the documentation there for more details.
//!
//! This module implements a high-level interface to the MC33HB2001. This is
//! the recommended way to access the MC33HB2001 using this crate, unless you
//! need the greater flexibility provided by the [register-level interface].
//!
//! [register-level interface]: ../ll/index.html

use crate::ll;
use core::fmt;

pub use ready::*;
pub use state_impls::*;

mod ready;
mod state_impls;
mod uninitialized;

/// Entry point to the MC33HB2001 driver API
///
/// A driver starts out [`Uninitialized`] and becomes [`Ready`] through
/// [`MC33HB2001::init`], which consumes it. Field operations are only
/// available on a ready driver.
pub struct MC33HB2001<T, State> {
    ll: ll::MC33HB2001<T>,
    state: State,
}

impl<T, State> MC33HB2001<T, State> {
    /// Provides direct access to the register-level API
    ///
    /// Be aware that by using the register-level API, you can invalidate
    /// assumptions that the high-level API makes about the device.
    pub fn ll(&mut self) -> &mut ll::MC33HB2001<T> {
        &mut self.ll
    }

    /// Release the transport
    pub fn free(self) -> T {
        self.ll.free()
    }
}

// Can't be derived without putting requirements on `T`.
impl<T, State> fmt::Debug for MC33HB2001<T, State>
where
    State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MC33HB2001 {{ state: ")?;
        self.state.fmt(f)?;
        write!(f, ", .. }}")?;

        Ok(())
    }
}
