//! Standard math functions.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::{
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
    Rng,
};

use super::{Arity, Library, MathFn};
use crate::{
    arith,
    error::{ArithmeticError, Error},
    EvalResult,
};
use formula_tree::{BinaryOp, Number};

fn real_arg(function: &str, arg: Number) -> EvalResult<f64> {
    arg.as_real()
        .ok_or_else(|| Error::native(function, format!("expected a real number, got {arg}")))
}

fn int_arg(function: &str, arg: Number) -> EvalResult<i64> {
    arg.as_int()
        .ok_or_else(|| Error::native(function, format!("expected an integer, got {arg}")))
}

fn non_negative_int_arg(function: &str, arg: Number) -> EvalResult<u64> {
    let value = int_arg(function, arg)?;
    u64::try_from(value).map_err(|_| Error::native(function, "argument must be non-negative"))
}

/// Converts an integral float into an integer number.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(function: &str, value: f64) -> EvalResult {
    // `i64::MAX as f64` is rounded up to 2^63, so the upper bound is exclusive.
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(Number::Int(value as i64))
    } else {
        Err(Error::native(
            function,
            format!("cannot convert {value} to an integer"),
        ))
    }
}

fn from_u64(value: u64) -> EvalResult {
    i64::try_from(value)
        .map(Number::Int)
        .map_err(|_| ArithmeticError::IntegerOverflow.into())
}

/// Rounds half to even.
fn round_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 {
        2.0 * (value / 2.0).round()
    } else {
        rounded
    }
}

fn real_fn(name: &str, function: fn(f64) -> f64) -> MathFn {
    let fn_name = name.to_owned();
    MathFn::new(name, Arity::Exact(1), move |args| {
        let x = real_arg(&fn_name, args[0])?;
        Ok(Number::Real(function(x)))
    })
}

/// Real function defined on a subset of reals.
fn partial_real_fn(name: &str, domain: fn(f64) -> bool, function: fn(f64) -> f64) -> MathFn {
    let fn_name = name.to_owned();
    MathFn::new(name, Arity::Exact(1), move |args| {
        let x = real_arg(&fn_name, args[0])?;
        if domain(x) {
            Ok(Number::Real(function(x)))
        } else {
            Err(Error::native(&fn_name, "math domain error"))
        }
    })
}

fn rounding_fn(name: &str, function: fn(f64) -> f64) -> MathFn {
    let fn_name = name.to_owned();
    MathFn::new(name, Arity::Exact(1), move |args| match args[0] {
        Number::Int(_) => Ok(args[0]),
        Number::Bool(x) => Ok(Number::Int(x.into())),
        arg => float_to_int(&fn_name, function(real_arg(&fn_name, arg)?)),
    })
}

fn abs(args: &[Number]) -> EvalResult {
    Ok(match args[0] {
        Number::Int(x) => Number::Int(x.checked_abs().ok_or(ArithmeticError::IntegerOverflow)?),
        Number::Bool(x) => Number::Int(x.into()),
        Number::Real(x) => Number::Real(x.abs()),
        Number::Complex(x) => Number::Real(x.norm()),
    })
}

fn factorial(args: &[Number]) -> EvalResult {
    let n = non_negative_int_arg("factorial", args[0])?;
    let product = (2..=n).try_fold(1_u64, u64::checked_mul);
    product.map_or_else(|| Err(ArithmeticError::IntegerOverflow.into()), from_u64)
}

fn root(args: &[Number]) -> EvalResult {
    let x = args[0];
    let degree = args.get(1).copied().unwrap_or(Number::Int(2));
    if degree.is_zero() {
        return Ok(Number::Int(1));
    }
    let real_degree = degree.as_real();
    if real_degree == Some(1.0) {
        return Ok(x);
    }
    if real_degree == Some(2.0) {
        if let Some(x) = x.as_real() {
            if x >= 0.0 {
                return Ok(Number::Real(x.sqrt()));
            }
        }
    }

    let exponent = arith::binary_op(BinaryOp::Div, Number::Int(1), degree)?;
    Ok(arith::binary_op(BinaryOp::Power, x, exponent)?)
}

fn log(args: &[Number]) -> EvalResult {
    let x = real_arg("log", args[0])?;
    if x <= 0.0 {
        return Err(Error::native("log", "math domain error"));
    }
    let Some(&base) = args.get(1) else {
        return Ok(Number::Real(x.ln()));
    };
    let base = real_arg("log", base)?;
    if base <= 0.0 {
        return Err(Error::native("log", "math domain error"));
    }
    if base == 1.0 {
        return Err(ArithmeticError::DivisionByZero.into());
    }
    Ok(Number::Real(x.ln() / base.ln()))
}

fn exp(args: &[Number]) -> EvalResult {
    Ok(match args[0] {
        Number::Complex(x) => Number::Complex(x.exp()),
        arg => Number::Real(real_arg("exp", arg)?.exp()),
    })
}

/// Computes the number of `k`-permutations of `n` elements.
fn permutations(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    (n - k + 1..=n).try_fold(1_u64, u64::checked_mul)
}

fn comb(args: &[Number]) -> EvalResult {
    let n = non_negative_int_arg("comb", args[0])?;
    let k = non_negative_int_arg("comb", args[1])?;
    if k > n {
        return Ok(Number::Int(0));
    }
    let k = k.min(n - k);
    let mut result = 1_u64;
    for i in 0..k {
        // The intermediate result is always divisible by `i + 1`.
        result = result
            .checked_mul(n - i)
            .ok_or(ArithmeticError::IntegerOverflow)?
            / (i + 1);
    }
    from_u64(result)
}

fn perm(args: &[Number]) -> EvalResult {
    let n = non_negative_int_arg("perm", args[0])?;
    let k = match args.get(1) {
        Some(&k) => non_negative_int_arg("perm", k)?,
        None => n,
    };
    permutations(n, k).map_or_else(|| Err(ArithmeticError::IntegerOverflow.into()), from_u64)
}

fn gcd_pair(mut x: u64, mut y: u64) -> u64 {
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x
}

fn gcd(args: &[Number]) -> EvalResult {
    let mut result = 0_u64;
    for &arg in args {
        result = gcd_pair(result, int_arg("gcd", arg)?.unsigned_abs());
    }
    from_u64(result)
}

fn lcm(args: &[Number]) -> EvalResult {
    let mut result = 1_u64;
    for &arg in args {
        let value = int_arg("lcm", arg)?.unsigned_abs();
        if value == 0 {
            return Ok(Number::Int(0));
        }
        result = (result / gcd_pair(result, value))
            .checked_mul(value)
            .ok_or(ArithmeticError::IntegerOverflow)?;
    }
    from_u64(result)
}

fn round(args: &[Number]) -> EvalResult {
    let Some(&digits) = args.get(1) else {
        return match args[0] {
            Number::Int(_) => Ok(args[0]),
            Number::Bool(x) => Ok(Number::Int(x.into())),
            arg => float_to_int("round", round_even(real_arg("round", arg)?)),
        };
    };

    let digits = int_arg("round", digits)?;
    let digits = i32::try_from(digits)
        .map_err(|_| Error::native("round", "number of digits is too large"))?;
    let x = real_arg("round", args[0])?;
    let scale = 10_f64.powi(digits);
    Ok(Number::Real(round_even(x * scale) / scale))
}

fn dist(args: &[Number]) -> EvalResult {
    if args.len() % 2 != 0 {
        return Err(Error::native(
            "dist",
            "expected an even number of coordinates",
        ));
    }
    let (p, q) = args.split_at(args.len() / 2);
    let mut sum = 0.0;
    for (&x, &y) in p.iter().zip(q) {
        let diff = real_arg("dist", x)? - real_arg("dist", y)?;
        sum += diff * diff;
    }
    Ok(Number::Real(sum.sqrt()))
}

fn hypot(args: &[Number]) -> EvalResult {
    let mut sum = 0.0;
    for &arg in args {
        let x = real_arg("hypot", arg)?;
        sum += x * x;
    }
    Ok(Number::Real(sum.sqrt()))
}

fn random(args: &[Number]) -> EvalResult {
    let low = int_arg("random", args[0])?;
    let high = int_arg("random", args[1])?;
    if low > high {
        return Err(Error::native("random", format!("empty range [{low}, {high}]")));
    }
    Ok(Number::Int(rand::thread_rng().gen_range(low..=high)))
}

fn choose(args: &[Number]) -> EvalResult {
    args.choose(&mut rand::thread_rng())
        .copied()
        .ok_or_else(|| Error::native("choose", "no values to choose from"))
}

fn randweight(args: &[Number]) -> EvalResult {
    if args.len() % 2 != 0 {
        return Err(Error::native(
            "randweight",
            "expected pairs of values and weights",
        ));
    }
    if let [value, _] = args {
        return Ok(*value);
    }
    let (values, weights): (Vec<_>, Vec<_>) = args
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip();
    let weights = weights
        .into_iter()
        .map(|weight| real_arg("randweight", weight))
        .collect::<EvalResult<Vec<_>>>()?;
    let distribution =
        WeightedIndex::new(&weights).map_err(|err| Error::native("randweight", err.to_string()))?;
    Ok(values[distribution.sample(&mut rand::thread_rng())])
}

fn truthiness(args: &[Number]) -> impl Iterator<Item = bool> + '_ {
    args.iter().map(Number::is_truthy)
}

/// Returns the first value with a truthy condition, or the default value.
/// Args are `value0, cond0, value1, cond1, ..., default`.
fn ifs(args: &[Number]) -> EvalResult {
    if args.len() % 2 == 0 {
        return Err(Error::native(
            "ifs",
            "expected pairs of values and conditions followed by a default value",
        ));
    }
    let (pairs, default) = args.split_at(args.len() - 1);
    let selected = pairs
        .chunks_exact(2)
        .find(|pair| pair[1].is_truthy())
        .map_or(default[0], |pair| pair[0]);
    Ok(selected)
}

fn complex(args: &[Number]) -> EvalResult {
    let re = args[0];
    let im = args.get(1).copied().unwrap_or(Number::Int(0));
    let im = im.as_complex() * Complex64::i();
    Ok(Number::Complex(re.as_complex() + im))
}

fn real(args: &[Number]) -> EvalResult {
    Ok(match args[0] {
        Number::Complex(x) => Number::Real(x.re),
        Number::Bool(x) => Number::Int(x.into()),
        arg => arg,
    })
}

fn imag(args: &[Number]) -> EvalResult {
    Ok(match args[0] {
        Number::Complex(x) => Number::Real(x.im),
        Number::Real(_) => Number::Real(0.0),
        Number::Int(_) | Number::Bool(_) => Number::Int(0),
    })
}

fn conjugate(args: &[Number]) -> EvalResult {
    Ok(match args[0] {
        Number::Complex(x) => Number::Complex(x.conj()),
        Number::Bool(x) => Number::Int(x.into()),
        arg => arg,
    })
}

fn phase(args: &[Number]) -> EvalResult {
    Ok(Number::Real(args[0].as_complex().arg()))
}

fn modulus(args: &[Number]) -> EvalResult {
    Ok(Number::Real(args[0].as_complex().norm()))
}

impl Library {
    /// Creates a library with standard math functions:
    ///
    /// | Group | Functions |
    /// |-------|-----------|
    /// | Basic | `abs`, `factorial`, `root`, `sqrt`, `log`, `exp`, `comb`, `perm`, `gcd`, `lcm` |
    /// | Rounding | `round`, `ceil`, `floor`, `int` |
    /// | Trigonometry | `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `dist`, `hypot` |
    /// | Angles | `degrees`, `radians` |
    /// | Hyperbolic | `sinh`, `cosh`, `tanh`, `asinh`, `acosh`, `atanh` |
    /// | Random | `random`, `choose`, `randweight` |
    /// | Logic | `bool`, `not`, `and`, `or`, `xor`, `if`, `ifs` |
    /// | Complex | `complex`, `real`, `imag`, `conjugate`, `phase`, `modulus` |
    ///
    /// `if(x, y, cond)` returns `x` if `cond` is truthy and `y` otherwise.
    /// `ifs(x0, cond0, x1, cond1, .., default)` returns the first `x` with a truthy
    /// condition, or `default` if there is none.
    pub fn standard() -> Self {
        let functions = [
            // basic
            MathFn::new("abs", Arity::Exact(1), abs),
            MathFn::new("factorial", Arity::Exact(1), factorial),
            MathFn::new("root", Arity::Range(1, 2), root),
            MathFn::new("sqrt", Arity::Exact(1), root),
            MathFn::new("log", Arity::Range(1, 2), log),
            MathFn::new("exp", Arity::Exact(1), exp),
            MathFn::new("comb", Arity::Exact(2), comb),
            MathFn::new("perm", Arity::Range(1, 2), perm),
            MathFn::new("gcd", Arity::AtLeast(0), gcd),
            MathFn::new("lcm", Arity::AtLeast(0), lcm),
            // rounding
            MathFn::new("round", Arity::Range(1, 2), round),
            rounding_fn("ceil", f64::ceil),
            rounding_fn("floor", f64::floor),
            rounding_fn("int", f64::trunc),
            // trigonometry
            real_fn("sin", f64::sin),
            real_fn("cos", f64::cos),
            real_fn("tan", f64::tan),
            partial_real_fn("asin", |x| (-1.0..=1.0).contains(&x), f64::asin),
            partial_real_fn("acos", |x| (-1.0..=1.0).contains(&x), f64::acos),
            real_fn("atan", f64::atan),
            MathFn::new("dist", Arity::AtLeast(2), dist),
            MathFn::new("hypot", Arity::AtLeast(0), hypot),
            // angles
            real_fn("degrees", |x| x * 180.0 / PI),
            real_fn("radians", |x| x * PI / 180.0),
            // hyperbolic
            real_fn("sinh", f64::sinh),
            real_fn("cosh", f64::cosh),
            real_fn("tanh", f64::tanh),
            real_fn("asinh", f64::asinh),
            partial_real_fn("acosh", |x| x >= 1.0, f64::acosh),
            partial_real_fn("atanh", |x| x > -1.0 && x < 1.0, f64::atanh),
            // random
            MathFn::new("random", Arity::Exact(2), random),
            MathFn::new("choose", Arity::AtLeast(1), choose),
            MathFn::new("randweight", Arity::AtLeast(2), randweight),
            // logic
            MathFn::new("bool", Arity::Exact(1), |args| {
                Ok(Number::Bool(args[0].is_truthy()))
            }),
            MathFn::new("not", Arity::Exact(1), |args| {
                Ok(Number::Bool(!args[0].is_truthy()))
            }),
            MathFn::new("and", Arity::AtLeast(2), |args| {
                Ok(Number::Bool(truthiness(args).all(|x| x)))
            }),
            MathFn::new("or", Arity::AtLeast(2), |args| {
                Ok(Number::Bool(truthiness(args).any(|x| x)))
            }),
            MathFn::new("xor", Arity::Exact(2), |args| {
                Ok(Number::Bool(args[0].is_truthy() != args[1].is_truthy()))
            }),
            MathFn::new("if", Arity::Exact(3), |args| {
                Ok(if args[2].is_truthy() { args[0] } else { args[1] })
            }),
            MathFn::new("ifs", Arity::AtLeast(1), ifs),
            // complex
            MathFn::new("complex", Arity::Range(1, 2), complex),
            MathFn::new("real", Arity::Exact(1), real),
            MathFn::new("imag", Arity::Exact(1), imag),
            MathFn::new("conjugate", Arity::Exact(1), conjugate),
            MathFn::new("phase", Arity::Exact(1), phase),
            MathFn::new("modulus", Arity::Exact(1), modulus),
        ];

        let mut library = Self::new();
        for function in functions {
            library.insert(function);
        }
        library
    }
}
