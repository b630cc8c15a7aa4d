//! Tests for math functions and the formula directory.

use assert_matches::assert_matches;
use num_complex::Complex64;

use formula_eval::{
    fns::{Arity, Library, MathFn},
    Bindings, Directory, Error, Formula, Number, Production, SymbolRegistry, Value,
};

use crate::symbols;

#[test]
fn composing_functions_over_formulas() {
    let library = Library::standard();
    let registry = SymbolRegistry::new();
    let [x, y] = symbols(&registry, ["x", "y"]);
    let (x, y) = (Formula::new(x), Formula::new(y));

    let max = library.get("if").unwrap();
    let formula = max
        .compose::<Formula>(vec![(&x).into(), (&y).into(), x.greater_than(&y).into()])
        .unwrap();
    assert_eq!(formula.to_string(), "if(x, y, x>y)");
    assert_eq!(formula.arity(), 2);

    let expr = formula.subs(Bindings::new().with("x", 3).with("y", 5)).unwrap();
    assert_eq!(expr.text(), "if(3, 5, 3>5)");
    assert_eq!(expr.value(), Ok(Number::Int(5)));

    let curried = formula.curry(Bindings::new().with("y", -1)).unwrap();
    assert_eq!(curried.to_string(), "if(x, (-1), x>(-1))");
    let expr = curried.subs(Bindings::new().with("x", 0)).unwrap();
    assert_eq!(expr.value(), Ok(Number::Int(0)));
}

#[test]
fn function_calls_in_operator_expressions() {
    let library = Library::standard();
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);

    let abs = library.get("abs").unwrap();
    let production = abs.compose::<Production>(vec![(&x - 10).into()]).unwrap() * 2;
    let formula = Formula::new(production);
    assert_eq!(formula.to_string(), "abs(x-10)*2");
    let expr = formula.subs(Bindings::new().with("x", 4)).unwrap();
    assert_eq!(expr.text(), "abs(4-10)*2");
    assert_eq!(expr.value(), Ok(Number::Int(12)));
}

#[test]
fn dynamic_application() {
    let library = Library::standard();
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let gcd = library.get("gcd").unwrap();

    let value = gcd.apply(vec![Value::from(12), Value::from(18)]).unwrap();
    assert_eq!(value.as_number(), Some(Number::Int(6)));

    let value = gcd.apply(vec![Value::from(x.clone()), Value::from(18)]).unwrap();
    assert_matches!(&value, Value::Production(_));
    assert_eq!(value.to_string(), "gcd(x, 18)");

    let formula = Value::from(Formula::new(x.clone()));
    let err = gcd.apply(vec![formula, Value::from(x)]).unwrap_err();
    assert_matches!(err, Error::TypeMismatch { .. });
}

#[test]
fn arity_is_checked_on_composition() {
    let library = Library::standard();
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);

    let comb = library.get("comb").unwrap();
    let err = comb.compose::<Production>(vec![x.into()]).unwrap_err();
    assert_matches!(
        err,
        Error::ArityMismatch { ref function, expected: Arity::Exact(2), actual: 1 }
            if function == "comb"
    );
    assert_eq!(
        err.to_string(),
        "Function `comb` expects 2 arg(s), but is called with 1"
    );
}

#[test]
fn custom_functions() {
    let clamp = MathFn::new("clamp", Arity::Exact(3), |args| {
        let [x, min, max] = [args[0], args[1], args[2]].map(|arg| arg.as_real());
        match (x, min, max) {
            (Some(x), Some(min), Some(max)) if min <= max => Ok(Number::Real(x.clamp(min, max))),
            _ => Err(Error::native("clamp", "invalid args")),
        }
    });
    let mut library = Library::new();
    assert!(library.insert(clamp).is_none());

    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let clamp = library.get("clamp").unwrap();
    let formula = Formula::new(clamp.compose(vec![x.into(), 0.into(), 1.into()]).unwrap());
    assert_eq!(formula.to_string(), "clamp(x, 0, 1)");

    let value = formula.subs(Bindings::new().with("x", 1.5)).unwrap().value();
    assert_eq!(value, Ok(Number::Real(1.0)));
    let err = formula
        .subs(Bindings::new().with("x", Complex64::i()))
        .unwrap()
        .value()
        .unwrap_err();
    assert_eq!(err, Error::native("clamp", "invalid args"));
}

#[test]
fn calling_formulas_by_name() {
    let directory = Directory::new();
    let registry = SymbolRegistry::new();
    let [r, h] = symbols(&registry, ["r", "h"]);

    let volume = Formula::new(r.pow(2) * h * 3);
    volume.register(&directory, "cylinder");
    assert!(directory.contains("cylinder"));
    assert_eq!(directory.names().into_iter().collect::<Vec<_>>(), ["cylinder"]);

    let value = directory
        .call("cylinder", Bindings::new().with("r", 2).with("h", 5))
        .unwrap();
    assert_eq!(value, Number::Int(60));

    let err = directory.call("cylinder", Bindings::new().with("r", 2)).unwrap_err();
    assert_eq!(err.missing_arguments(), ["h"]);
    let err = directory.call("cone", Bindings::new()).unwrap_err();
    assert_eq!(err, Error::UnknownFormula("cone".to_owned()));
}

#[test]
fn named_formulas_in_global_directory() {
    let registry = SymbolRegistry::new();
    let [x] = symbols(&registry, ["x"]);
    let formula = Formula::named("integration_double", x * 2);
    assert_eq!(formula.to_string(), "x*2");

    let stored = Directory::global().get("integration_double").unwrap();
    let value = stored.subs(Bindings::new().with("x", 21)).unwrap().value();
    assert_eq!(value, Ok(Number::Int(42)));
}
