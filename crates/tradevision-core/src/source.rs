//! Series sources.
//!
//! The presentation layer asks a [`SeriesSource`] for bars instead of
//! calling the generator directly, so an alternate feed can supply the same
//! [`Series`] shape.

use crate::generator::SeriesRequest;
use crate::{CoreError, Series};

pub trait SeriesSource: Send + Sync {
    /// Short identifier shown in command output.
    fn name(&self) -> &'static str;

    /// Produce a series for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] for a zero point count.
    fn series(&self, request: &SeriesRequest) -> Result<Series, CoreError>;
}

/// Geometric random walk seeded per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SeriesSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn series(&self, request: &SeriesRequest) -> Result<Series, CoreError> {
        request.generate()
    }
}
