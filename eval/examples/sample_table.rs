//! Builds a damped oscillation formula, curries its parameters and prints a table
//! of sampled values.

use anyhow::Context as _;

use formula_eval::{
    fns::Library, Bindings, Formula, PlotRequest, Production, Sampler, SymbolRegistry,
};

fn main() -> anyhow::Result<()> {
    let registry = SymbolRegistry::new();
    let [t, a, k, w] = ["t", "a", "k", "w"].map(|name| registry.symbol(name));
    let (t, a, k, w) = (t?, a?, k?, w?);

    let library = Library::standard();
    let exp = library.get("exp").context("`exp` is not defined")?;
    let cos = library.get("cos").context("`cos` is not defined")?;

    let envelope = exp.compose::<Production>(vec![(-k * &t).into()])?;
    let oscillation = cos.compose::<Production>(vec![(w * t).into()])?;
    let formula = Formula::new(a * envelope * oscillation);
    println!("Formula: {formula}");

    let params = Bindings::new().with("a", 2).with("k", 0.5).with("w", 3);
    let curried = formula.curry(params)?;
    println!("Curried: {curried}");

    let request = PlotRequest::new(curried.clone(), (0.0, 2.0))?;
    let samples = Sampler::new(8)?.sample(&request)?;
    println!("{:>8} | {:>24} | value", request.variable(), "expression");
    for (x, y) in samples.iter() {
        let expr = curried.subs(Bindings::new().with(request.variable(), x))?;
        let text = expr.text();
        println!("{x:>8.3} | {text:>24} | {y}");
    }
    Ok(())
}
