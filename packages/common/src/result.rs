use crate::error::CapabilityError;

/// Result type returned by sub-compilers and post-processing plugins
pub type CapabilityResult<T> = Result<T, CapabilityError>;
