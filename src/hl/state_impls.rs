/// Indicates that the `MC33HB2001` instance is not initialized yet
#[derive(Debug)]
pub struct Uninitialized;

/// Indicates that the `MC33HB2001` instance is ready to be used
#[derive(Debug)]
pub struct Ready;
