//! Sampling univariate formulas for plotting.

use crate::{
    bindings::Bindings,
    config::Config,
    error::{ArithmeticError, Error},
    formula::Formula,
    EvalResult,
};
use formula_tree::Number;

/// Request to sample a univariate [`Formula`] on a closed range.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    formula: Formula,
    variable: String,
    range: (f64, f64),
}

impl PlotRequest {
    /// Creates a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUnivariate`] if the formula does not have exactly one free variable,
    /// and [`Error::InvalidRange`] if `start > end` or either of bounds is NaN.
    pub fn new(formula: Formula, range: (f64, f64)) -> EvalResult<Self> {
        let (start, end) = range;
        let mut free_variables = formula.free_variables().iter();
        let variable = match (free_variables.next(), free_variables.next()) {
            (Some(variable), None) => variable.clone(),
            _ => {
                return Err(Error::NotUnivariate {
                    arity: formula.arity(),
                })
            }
        };
        if start.is_nan() || end.is_nan() || start > end {
            return Err(Error::InvalidRange { start, end });
        }

        Ok(Self {
            formula,
            variable,
            range,
        })
    }

    /// Returns the sampled formula.
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Returns the name of the free variable of the formula.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the sampled range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Sampled points of a formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    /// Values of the free variable.
    pub xs: Vec<f64>,
    /// Formula values corresponding to `xs`.
    pub ys: Vec<Number>,
}

impl Samples {
    /// Returns the number of sampled points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Checks whether there are no sampled points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates over sampled points.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Number)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Evaluator of [`PlotRequest`]s on evenly spaced points.
///
/// # Examples
///
/// ```
/// # use formula_eval::{Formula, Number, PlotRequest, Sampler, SymbolRegistry};
/// # fn main() -> anyhow::Result<()> {
/// let registry = SymbolRegistry::new();
/// let x = registry.symbol("x")?;
/// let request = PlotRequest::new(Formula::new(1 / x), (-1.0, 1.0))?;
///
/// let samples = Sampler::new(4)?.sample(&request)?;
/// // The point `x == 0` is skipped because of division by zero.
/// assert_eq!(samples.xs, [-1.0, -0.5, 0.5, 1.0]);
/// assert_eq!(samples.ys[0], Number::Real(-1.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    precision: usize,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            precision: Config::DEFAULT_PRECISION,
        }
    }
}

impl Sampler {
    /// Maximum supported precision.
    pub const MAX_PRECISION: usize = 1 << 20;

    /// Creates a sampler splitting ranges into `precision` intervals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] if `precision` is zero or exceeds [`Self::MAX_PRECISION`].
    pub fn new(precision: usize) -> EvalResult<Self> {
        if precision == 0 || precision > Self::MAX_PRECISION {
            Err(Error::InvalidPrecision)
        } else {
            Ok(Self { precision })
        }
    }

    /// Creates a sampler with the precision from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] if the configured precision is out of range.
    pub fn from_config(config: &Config) -> EvalResult<Self> {
        Self::new(config.precision)
    }

    /// Returns the number of intervals the sampled range is split into.
    pub fn precision(&self) -> usize {
        self.precision
    }

    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    fn points(&self, (start, end): (f64, f64)) -> impl Iterator<Item = f64> {
        let intervals = if start == end { 0 } else { self.precision };
        let step = (end - start) / intervals.max(1) as f64;
        (0..=intervals).map(move |i| if i == intervals { end } else { start + step * i as f64 })
    }

    /// Evaluates the formula from `request` on `precision + 1` evenly spaced points
    /// of the range (or a single point if the range is degenerate). Points at which
    /// evaluation fails with division by zero are skipped.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors other than division by zero.
    pub fn sample(&self, request: &PlotRequest) -> EvalResult<Samples> {
        let evaluator = request.formula.evaluator();
        let mut samples = Samples::default();
        for x in self.points(request.range) {
            let bindings = Bindings::new().with(request.variable.as_str(), x);
            match evaluator.evaluate(&bindings) {
                Ok(y) => {
                    samples.xs.push(x);
                    samples.ys.push(y);
                }
                Err(Error::Arithmetic(ArithmeticError::DivisionByZero)) => {
                    log::trace!("skipped point {} = {x}: division by zero", request.variable);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use num_complex::Complex64;

    use super::*;
    use crate::SymbolRegistry;

    #[test]
    fn request_validation() {
        let registry = SymbolRegistry::new();
        let [x, y] = [registry.symbol("x").unwrap(), registry.symbol("y").unwrap()];

        let err = PlotRequest::new(Formula::new(&x + &y), (0.0, 1.0)).unwrap_err();
        assert_matches!(err, Error::NotUnivariate { arity: 2 });
        let err = PlotRequest::new(Formula::constant(1), (0.0, 1.0)).unwrap_err();
        assert_matches!(err, Error::NotUnivariate { arity: 0 });

        let err = PlotRequest::new(Formula::new(x.clone()), (1.0, 0.0)).unwrap_err();
        assert_matches!(err, Error::InvalidRange { .. });
        let err = PlotRequest::new(Formula::new(x.clone()), (f64::NAN, 0.0)).unwrap_err();
        assert_matches!(err, Error::InvalidRange { .. });

        let request = PlotRequest::new(Formula::new(x), (0.0, 0.0)).unwrap();
        assert_eq!(request.variable(), "x");
    }

    #[test]
    fn sampler_validation() {
        assert_eq!(Sampler::new(0).unwrap_err(), Error::InvalidPrecision);
        assert_eq!(Sampler::new(usize::MAX).unwrap_err(), Error::InvalidPrecision);
        let max = Sampler::MAX_PRECISION;
        assert_eq!(Sampler::new(max).unwrap().precision(), max);
        assert_eq!(Sampler::new(max + 1).unwrap_err(), Error::InvalidPrecision);
        let config = Config::default().with_precision(usize::MAX);
        assert_eq!(Sampler::from_config(&config).unwrap_err(), Error::InvalidPrecision);
        assert_eq!(Sampler::default().precision(), 640);
        let config = Config::default().with_precision(10);
        assert_eq!(Sampler::from_config(&config).unwrap().precision(), 10);
    }

    #[test]
    fn sampling_formula() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let request = PlotRequest::new(Formula::new(x.pow(2)), (0.0, 2.0)).unwrap();

        let samples = Sampler::new(8).unwrap().sample(&request).unwrap();
        assert_eq!(samples.len(), 9);
        assert_eq!(samples.xs[8], 2.0);
        for (x, y) in samples.iter() {
            let Number::Real(y) = y else {
                panic!("unexpected value: {y:?}");
            };
            assert_abs_diff_eq!(y, x * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn sampling_degenerate_range() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let request = PlotRequest::new(Formula::new(x * 3), (1.5, 1.5)).unwrap();
        let samples = Sampler::default().sample(&request).unwrap();
        assert_eq!(samples.xs, [1.5]);
        assert_eq!(samples.ys, [Number::Real(4.5)]);
    }

    #[test]
    fn other_errors_are_propagated() {
        let registry = SymbolRegistry::new();
        let x = registry.symbol("x").unwrap();
        let request = PlotRequest::new(Formula::new(x.less_than(Complex64::i())), (0.0, 1.0));
        let err = Sampler::new(2).unwrap().sample(&request.unwrap()).unwrap_err();
        assert_eq!(err, Error::Arithmetic(ArithmeticError::Unordered));
    }
}
