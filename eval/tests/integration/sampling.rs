//! Tests for sampling formulas on ranges.

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;

use formula_eval::{
    fns::Library, Bindings, Config, Error, Formula, Number, PlotRequest, Sampler, SymbolRegistry,
};

use crate::symbols;

#[test]
fn sampling_curried_formula() {
    let registry = SymbolRegistry::new();
    let [x, k, b] = symbols(&registry, ["x", "k", "b"]);
    let line = Formula::new(x * k + b);

    let err = PlotRequest::new(line.clone(), (0.0, 1.0)).unwrap_err();
    assert_matches!(err, Error::NotUnivariate { arity: 3 });

    let line = line.curry(Bindings::new().with("k", 2).with("b", -1)).unwrap();
    let request = PlotRequest::new(line, (-2.0, 2.0)).unwrap();
    assert_eq!(request.variable(), "x");

    let samples = Sampler::new(4).unwrap().sample(&request).unwrap();
    assert_eq!(samples.xs, [-2.0, -1.0, 0.0, 1.0, 2.0]);
    let ys: Vec<_> = samples
        .ys
        .iter()
        .map(|y| y.as_real().unwrap())
        .collect();
    assert_eq!(ys, [-5.0, -3.0, -1.0, 1.0, 3.0]);
}

#[test]
fn sampling_with_configured_precision() {
    let registry = SymbolRegistry::new();
    let [t] = symbols(&registry, ["t"]);
    let sin = Library::standard().get("sin").cloned().unwrap();
    let formula = Formula::new(sin.compose(vec![t.into()]).unwrap());
    let request = PlotRequest::new(formula, (0.0, std::f64::consts::PI)).unwrap();

    let config = Config::default().with_precision(6);
    let samples = Sampler::from_config(&config).unwrap().sample(&request).unwrap();
    assert_eq!(samples.len(), 7);
    let (last_x, last_y) = samples.iter().last().unwrap();
    assert_abs_diff_eq!(last_x, std::f64::consts::PI);
    let Number::Real(last_y) = last_y else {
        panic!("unexpected value: {last_y:?}");
    };
    assert_abs_diff_eq!(last_y, 0.0, epsilon = 1e-12);
}

#[test]
fn sampling_skips_poles() {
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let formula = Formula::new(1 / (&x - 1) + 1);
    let request = PlotRequest::new(formula, (0.0, 2.0)).unwrap();

    let samples = Sampler::new(2).unwrap().sample(&request).unwrap();
    assert_eq!(samples.xs, [0.0, 2.0]);
    assert_eq!(samples.ys, [Number::Real(0.0), Number::Real(2.0)]);
}
