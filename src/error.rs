use core::fmt;

/// An error that can occur when talking to the MC33HB2001
///
/// The only thing that can go wrong is the exchange itself. `E` is the error
/// type of the [`Transport`] in use, which is [`SpiError`] for the bundled
/// SPI transport.
///
/// When a read-modify-write fails during its read, the write is never
/// attempted, so the register is left as the device had it.
///
/// [`Transport`]: crate::Transport
/// [`SpiError`]: crate::transport::SpiError
#[derive(Debug)]
pub enum Error<E> {
    /// The transport failed to exchange a word with the device
    Transport(E),
}

impl<E> Error<E> {
    /// Returns the underlying transport error
    pub fn into_inner(self) -> E {
        match self {
            Error::Transport(error) => error,
        }
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Transport(error) => write!(f, "transport error: {:?}", error),
        }
    }
}
