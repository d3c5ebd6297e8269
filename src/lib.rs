//! # re2dfa — regular expression to minimal DFA compiler
//!
//! Compiles a regular expression over alphanumeric symbols, `(`, `)`, `|`
//! and `*` into a minimal deterministic finite automaton, keeping every
//! intermediate stage available for inspection:
//!
//! ```text
//! "a(b|c)*d"
//!      │
//!      ▼
//!  ┌──────────────────────────────────────────────────────────┐
//!  │ 1. Normalize      "a.(b|c)*.d"   explicit concatenation  │
//!  │ 2. Postfix        "abc|*.d."     shunting-yard           │
//!  │ 3. Syntax tree    SyntaxNode     stack build             │
//!  │ 4. Thompson       ε-NFA          fragment splicing       │
//!  │ 5. Subset         DFA            powerset construction   │
//!  │ 6. Minimize       minimal DFA    partition refinement    │
//!  └──────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//!  min_dfa.accepts("abcbcd") == true
//! ```
//!
//! Data flows strictly forward; each stage's output is immutable once
//! produced. The one-call entry point is [`pipeline::compile`], which
//! returns a [`pipeline::Compilation`] holding all six artifacts.
//!
//! Every automaton stage exposes a structural dump (state list with ids and
//! accepting flags, edge list with source/destination/symbol) as
//! serde-serializable values, so external visualizers can render any stage
//! without this crate committing to an output format.

pub mod automata;
pub mod pipeline;
pub mod postfix;
pub mod syntax_tree;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use automata::{Dfa, Nfa};
pub use pipeline::{compile, Compilation};
pub use syntax_tree::SyntaxNode;

/// Error raised while compiling a regular expression.
///
/// All variants are malformed-input conditions detected before any automaton
/// is built; compilation fails fast and no later stage runs. Positions are
/// char offsets into the string the failing stage consumed (the normalized
/// regex for parenthesis errors, the postfix sequence for operand errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The pattern produced no syntax tree (empty regex or bare `()`).
    /// A trivial automaton's acceptance semantics would be ambiguous, so
    /// this is surfaced as a failure rather than silently constructed.
    #[error("empty pattern produces no automaton")]
    EmptyPattern,

    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("unbalanced parenthesis at offset {position}")]
    UnbalancedParen { position: usize },

    /// An operator in the postfix sequence had too few operands on the
    /// build stack (`*` needs one, `.` and `|` need two).
    #[error("operator '{operator}' at offset {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    /// More than one subtree was left on the build stack after the postfix
    /// scan — the pattern is missing an operator between subexpressions.
    #[error("{count} disconnected subexpressions remain (missing operator?)")]
    DanglingOperands { count: usize },
}
