//! Immutable expression trees for parametric formulas, together with precedence-aware
//! rendering into display templates.
//!
//! This crate is the syntax half of the formula engine: it defines the shape of formulas,
//! but knows nothing about evaluating them. Evaluation, substitution and currying live
//! in the `formula-eval` crate.
//!
//! # Overview
//!
//! - [`Number`] is the leaf payload: an integer, a real, a complex number or a Boolean value.
//! - [`Tree`] is an immutable tree of numeric leaves, symbol leaves, unary and binary
//!   operations, and function calls. Subtrees are reference-counted and shared between trees.
//! - [`UnaryOp`] and [`BinaryOp`] enumerate supported operations; each operation
//!   has an [`OpPriority`] assigned from a fixed precedence table.
//! - [`Template`] is the rendered form of a tree: literal text interleaved with
//!   placeholders for symbols. It uses the fewest parentheses that preserve the tree shape.
//!
//! # Examples
//!
//! ```
//! use formula_tree::{BinaryOp, Delimiters, Number, Tree};
//!
//! // x * y - z
//! let product = Tree::binary(Tree::symbol("x"), BinaryOp::Mul, Tree::symbol("y"));
//! let tree = Tree::binary(product, BinaryOp::Sub, Tree::symbol("z"));
//! assert_eq!(tree.to_string(), "x*y-z");
//!
//! let template = tree.template();
//! assert_eq!(template.marked(Delimiters::default()), "$x@*$y@-$z@");
//! let text = template.fill_numbers(|name| match name {
//!     "x" => Some(Number::Int(2)),
//!     "y" => Some(Number::Real(8.2)),
//!     _ => Some(Number::Int(-10)),
//! });
//! assert_eq!(text, "2*8.2-(-10)");
//! ```

#![doc(html_root_url = "https://docs.rs/formula-tree/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub use self::{
    number::{Number, NumberKind, OperandDisplay},
    ops::{Associativity, BinaryOp, Op, OpPriority, UnaryOp},
    render::{Delimiters, Segment, Template},
    tree::{Tree, TreeType},
};

mod number;
mod ops;
mod render;
mod tree;
