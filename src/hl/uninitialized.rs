use crate::{ll, transport::Transport, Config, Error, Ready, Uninitialized, MC33HB2001};

impl<T> MC33HB2001<T, Uninitialized> {
    /// Create a new instance of `MC33HB2001`
    ///
    /// Requires the transport that is connected to the MC33HB2001. Nothing is
    /// sent to the device until [`MC33HB2001::init`] is called.
    pub fn new(transport: T) -> Self {
        MC33HB2001 {
            ll: ll::MC33HB2001::new(transport),
            state: Uninitialized,
        }
    }
}

impl<T> MC33HB2001<T, Uninitialized>
where
    T: Transport,
{
    /// Initialize the driver
    ///
    /// Applies `config` and reads the identification register once. The read
    /// proves that the transport works and leaves the device's response
    /// pipeline holding a known register, so the first response a caller
    /// sees belongs to one of their own commands.
    ///
    /// Consumes the uninitialized driver; a driver can't be initialized twice.
    pub fn init(mut self, config: Config) -> Result<MC33HB2001<T, Ready>, Error<T::Error>> {
        self.ll.configure(&config);

        let id = self.ll.id().read()?;
        log::debug!(
            "mc33hb2001: initialized ({:?} responses, id {:?})",
            config.response_timing,
            id
        );

        Ok(MC33HB2001 {
            ll: self.ll,
            state: Ready,
        })
    }
}
