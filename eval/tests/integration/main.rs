//! End-to-end tests of formula composition, substitution and currying.

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use num_complex::Complex64;

use formula_eval::{
    ArithmeticError, Bindings, Error, Expression, Formula, Number, Production, SymbolRegistry,
};

mod functions;
mod sampling;

fn symbols<const N: usize>(registry: &SymbolRegistry, names: [&str; N]) -> [Production; N] {
    names.map(|name| registry.symbol(name).unwrap())
}

fn real_value(expr: &Expression) -> f64 {
    match expr.value().unwrap() {
        Number::Real(value) => value,
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn identity_formula_returns_bound_value() {
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let formula = Formula::new(x);

    let values = [
        Number::Int(0),
        Number::Int(-42),
        Number::Real(8.2),
        Number::Real(-0.0),
        Number::Complex(Complex64::new(1.0, -1.0)),
        Number::Bool(true),
    ];
    for value in values {
        let expr = formula.subs(Bindings::new().with("x", value)).unwrap();
        assert_eq!(expr.value().unwrap(), value);
    }
}

#[test]
fn literal_scenario() {
    let registry = SymbolRegistry::new();
    let [x, y, z] = symbols(&registry, ["x", "y", "z"]);
    let formula = Formula::new(x * y - z);

    let bindings = Bindings::new().with("x", 2).with("y", 8.2).with("z", 10);
    let expr = formula.subs(bindings).unwrap();
    assert_eq!(expr.text(), "2*8.2-10");
    assert_abs_diff_eq!(real_value(&expr), 2.0 * 8.2 - 10.0);
    assert_abs_diff_eq!(real_value(&expr), 6.4, epsilon = 1e-12);
}

#[test]
fn negative_values_in_text() {
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let formula = Formula::new(x + 1);
    let expr = formula.subs(Bindings::new().with("x", -5)).unwrap();
    assert_eq!(expr.text(), "(-5)+1");
    assert_eq!(expr.value().unwrap(), Number::Int(-4));
}

#[test]
fn composition_is_associative_in_value_but_not_in_text() {
    let registry = SymbolRegistry::new();
    let [x, y, z] = symbols(&registry, ["x", "y", "z"]);
    let [a, b, c] = [Formula::new(x * 2), Formula::new(y - 1), Formula::new(z.pow(2))];

    let left = (&a + &b) + &c;
    let right = &a + (&b + &c);
    assert_eq!(left.to_string(), "x*2+(y-1)+z**2");
    assert_eq!(right.to_string(), "x*2+(y-1+z**2)");

    for (x, y, z) in [(1, 2, 3), (-4, 0, 7), (100, -100, 2)] {
        let bindings = Bindings::new().with("x", x).with("y", y).with("z", z);
        let left_value = left.subs(bindings.clone()).unwrap().value().unwrap();
        let right_value = right.subs(bindings).unwrap().value().unwrap();
        assert_eq!(left_value, right_value);
    }
}

#[test]
fn curry_then_subs_equals_single_subs() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let formula = Formula::new(x + y);
    let full = Bindings::new().with("x", 3).with("y", 0.25);
    let expected = formula.subs(full).unwrap().value().unwrap();

    let splits = [
        (Bindings::new(), Bindings::new().with("x", 3).with("y", 0.25)),
        (Bindings::new().with("x", 3), Bindings::new().with("y", 0.25)),
        (Bindings::new().with("y", 0.25), Bindings::new().with("x", 3)),
        (Bindings::new().with("x", 3).with("y", 0.25), Bindings::new()),
    ];
    for (fixed, rest) in splits {
        let curried = formula.curry(fixed).unwrap();
        assert_eq!(curried.subs(rest).unwrap().value().unwrap(), expected);
    }
}

#[test]
fn subs_rejects_subsets_and_supersets() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);

    let sum = Formula::new(&x + y);
    let err = sum.subs(Bindings::new().with("x", 1)).unwrap_err();
    assert_matches!(err, Error::ArgumentMismatch { .. });

    let identity = Formula::new(x);
    let err = identity
        .subs(Bindings::new().with("x", 1).with("y", 2))
        .unwrap_err();
    assert_matches!(err, Error::ArgumentMismatch { .. });
    assert_eq!(err.unexpected_arguments(), ["y"]);
}

#[test]
fn duplicate_symbols_are_rejected() {
    let registry = SymbolRegistry::new();
    registry.symbol("x").unwrap();
    let err = registry.symbol("x").unwrap_err();
    assert_eq!(err, Error::DuplicateSymbolName("x".to_owned()));
    assert_eq!(err.to_string(), "Symbol `x` is already defined");
}

#[test]
fn curried_formulas_are_independent() {
    let registry = SymbolRegistry::new();
    let [x, y, z] = symbols(&registry, ["x", "y", "z"]);
    let formula = Formula::new(x.floor_div(&y) + z);

    let first = formula.curry(Bindings::new().with("y", 2)).unwrap();
    let second = formula.curry(Bindings::new().with("y", -3)).unwrap();
    assert_eq!(first.to_string(), "x//2+z");
    assert_eq!(second.to_string(), "x//(-3)+z");
    assert_eq!(formula.to_string(), "x//y+z");

    let bindings = Bindings::new().with("x", 7).with("z", 0);
    assert_eq!(first.subs(bindings.clone()).unwrap().value(), Ok(Number::Int(3)));
    assert_eq!(second.subs(bindings).unwrap().value(), Ok(Number::Int(-3)));

    // Currying the curried formula further.
    let constant = first.curry(Bindings::new().with("x", 9)).unwrap();
    assert_eq!(constant.to_string(), "9//2+z");
    assert_eq!(constant.arity(), 1);
}

#[test]
fn division_by_zero_surfaces_on_evaluation() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let formula = Formula::new(x % y);
    let expr = formula
        .subs(Bindings::new().with("x", 1.5).with("y", 0))
        .unwrap();
    assert_eq!(expr.text(), "1.5%0");
    let err = expr.value().unwrap_err();
    assert_eq!(err, Error::Arithmetic(ArithmeticError::DivisionByZero));
    assert_eq!(err.to_string(), "Arithmetic error: division by zero");
}

#[test]
fn missing_binding_in_raw_evaluator() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let formula = Formula::new(x * y);
    let err = formula
        .evaluator()
        .evaluate(&Bindings::new().with("x", 1))
        .unwrap_err();
    assert_matches!(err, Error::MissingBinding(name) if name == "y");
}

#[test]
fn bitwise_and_comparison_formulas() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let formula = Formula::new((&x << 2 | &y).greater_or_equal(16) ^ true);
    assert_eq!(formula.to_string(), "(x<<2|y>=16)^true");

    let expr = formula.subs(Bindings::new().with("x", 4).with("y", 1)).unwrap();
    assert_eq!(expr.value(), Ok(Number::Bool(false)));
    let expr = formula.subs(Bindings::new().with("x", 1).with("y", 1)).unwrap();
    assert_eq!(expr.value(), Ok(Number::Bool(true)));
}

#[test]
fn text_of_complex_and_boolean_values() {
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let formula = Formula::new(x.equals(y));
    let bindings = Bindings::new()
        .with("x", Complex64::new(-1.0, 0.5))
        .with("y", false);
    let expr = formula.subs(bindings).unwrap();
    assert_eq!(expr.text(), "(-1+0.5i)==false");
    assert_eq!(expr.value(), Ok(Number::Bool(false)));
}
