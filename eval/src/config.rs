//! Engine configuration.

use formula_tree::Delimiters;

/// Configuration shared by formula rendering and sampling.
///
/// # Examples
///
/// ```
/// # use formula_eval::{Config, Delimiters};
/// let config = Config::default();
/// assert_eq!(config.delimiters, Delimiters::new('$', '@'));
/// assert_eq!(config.precision, 640);
///
/// let config = Config::default()
///     .with_delimiters(Delimiters::new('{', '}'))
///     .with_precision(100);
/// assert_eq!(config.precision, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Delimiters surrounding placeholders in [marked](crate::Formula::marked()) templates.
    pub delimiters: Delimiters,
    /// Number of intervals the sampling range is split into.
    pub precision: usize,
}

impl Config {
    /// Default number of sampling intervals.
    pub const DEFAULT_PRECISION: usize = 640;

    /// Sets placeholder delimiters.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Sets the sampling precision.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            precision: Self::DEFAULT_PRECISION,
        }
    }
}
