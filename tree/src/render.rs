//! Precedence-aware rendering of trees into display templates.
//!
//! Rendering is top-down: each node is rendered with the priority level of its context
//! (the parent operation), and a binary operation is enclosed in parentheses only
//! if the context level exceeds the level of the operation itself. On equal levels,
//! the operand on the non-associative side is rendered one level higher, so that
//! `x - (y - z)` and `(x ** y) ** z` keep their parentheses. Unary operations
//! are always parenthesized, and function arguments are rendered at the top level.
//!
//! Symbols are not rendered as names; instead, a template records a placeholder
//! for each symbol occurrence, so that the values bound to symbols can be substituted
//! later without re-rendering the tree.

use core::fmt;
use std::collections::BTreeSet;

use crate::{
    number::Number,
    ops::{Associativity, OpPriority},
    tree::Tree,
};

/// Pair of chars delimiting placeholders in the [marked form](Template::marked())
/// of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiters {
    /// Char opening a placeholder.
    pub left: char,
    /// Char closing a placeholder.
    pub right: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: '$',
            right: '@',
        }
    }
}

impl Delimiters {
    /// Creates delimiters from the opening and closing chars.
    pub const fn new(left: char, right: char) -> Self {
        Self { left, right }
    }
}

/// Segment of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// Placeholder for the symbol with the specified name.
    Placeholder(String),
}

/// Display template of a tree: literal text interleaved with symbol placeholders.
///
/// Displaying a template via [`Display`](fmt::Display) outputs symbol names in place
/// of placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Renders the provided tree.
    pub fn new(tree: &Tree) -> Self {
        let mut template = Self::default();
        template.render(tree, OpPriority::TOP_LEVEL);
        template
    }

    /// Returns segments of this template.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns names of the symbols with placeholders in this template.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Fills placeholders using the provided closure. If the closure returns `None`
    /// for a symbol, the symbol name is output instead.
    pub fn fill<F>(&self, mut values: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder(name) => match values(name) {
                    Some(value) => output.push_str(&value),
                    None => output.push_str(name),
                },
            }
        }
        output
    }

    /// Fills placeholders with numeric values. Negative values are enclosed in parentheses.
    pub fn fill_numbers<F>(&self, mut values: F) -> String
    where
        F: FnMut(&str) -> Option<Number>,
    {
        self.fill(|name| values(name).map(|value| value.as_operand().to_string()))
    }

    /// Returns the marked form of this template, in which each placeholder is output
    /// as the symbol name enclosed in `delimiters`, e.g., `$x@*$y@-$z@`.
    pub fn marked(&self, delimiters: Delimiters) -> String {
        self.fill(|name| Some(format!("{}{name}{}", delimiters.left, delimiters.right)))
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_owned()));
        }
    }

    fn push_placeholder(&mut self, name: &str) {
        self.segments.push(Segment::Placeholder(name.to_owned()));
    }

    fn render(&mut self, tree: &Tree, context_level: u8) {
        match tree {
            Tree::Number(value) => self.push_text(&value.as_operand().to_string()),
            Tree::Symbol(name) => self.push_placeholder(name),

            Tree::Function { name, args } => {
                self.push_text(name);
                self.push_text("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.push_text(", ");
                    }
                    self.render(arg, OpPriority::TOP_LEVEL);
                }
                self.push_text(")");
            }

            Tree::Unary {
                op,
                inner,
                priority,
            } => {
                self.push_text("(");
                self.push_text(op.as_str());
                self.render(inner, priority.level());
                self.push_text(")");
            }

            Tree::Binary {
                lhs,
                op,
                rhs,
                priority,
            } => {
                let level = priority.level();
                let (lhs_level, rhs_level) = match op.associativity() {
                    Associativity::Left => (level, level + 1),
                    Associativity::Right => (level + 1, level),
                    Associativity::None => (level + 1, level + 1),
                };

                let needs_parens = context_level > level;
                if needs_parens {
                    self.push_text("(");
                }
                self.render(lhs, lhs_level);
                self.push_text(op.as_str());
                self.render(rhs, rhs_level);
                if needs_parens {
                    self.push_text(")");
                }
            }
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) | Segment::Placeholder(text) => formatter.write_str(text)?,
            }
        }
        Ok(())
    }
}
