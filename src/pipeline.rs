//! The compilation pipeline, all stages composed strictly in sequence.
//!
//! ```text
//! &str ─→ insert_concatenation ─→ to_postfix ─→ build_syntax_tree
//!                                                      │
//!      minimize ←─ subset_construction ←─ build_nfa ←──┘
//! ```
//!
//! [`compile`] runs all stages and returns a [`Compilation`] holding every
//! intermediate artifact; no stage mutates a prior stage's output, and a
//! failure in any stage prevents all later stages from running.

use crate::automata::minimize::minimize;
use crate::automata::subset::subset_construction;
use crate::automata::thompson::build_nfa;
use crate::automata::{Dfa, Nfa};
use crate::postfix::{insert_concatenation, to_postfix};
use crate::syntax_tree::{build_syntax_tree, SyntaxNode};
use crate::CompileError;

/// All artifacts of one pipeline run, in production order. Each field is
/// immutable once the run completes; a new regex means a new run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// The raw input pattern.
    pub regex: String,
    /// The pattern with explicit `.` concatenation markers.
    pub normalized: String,
    /// The postfix token sequence.
    pub postfix: String,
    /// The syntax tree built from the postfix sequence.
    pub syntax_tree: SyntaxNode,
    /// The Thompson epsilon-NFA.
    pub nfa: Nfa,
    /// The effective input alphabet collected from the NFA, sorted.
    pub alphabet: Vec<char>,
    /// The subset-construction DFA (possibly partial).
    pub dfa: Dfa,
    /// The minimized DFA — the pipeline's final product.
    pub min_dfa: Dfa,
}

impl Compilation {
    /// Acceptance query against the minimized DFA.
    pub fn accepts(&self, input: &str) -> bool {
        self.min_dfa.accepts(input)
    }
}

/// Compile a regular expression into a minimized DFA, retaining all
/// intermediate stages.
///
/// # Errors
///
/// Any [`CompileError`]: empty patterns, unbalanced parentheses, and
/// operator/operand mismatches are rejected before automaton construction.
pub fn compile(regex: &str) -> Result<Compilation, CompileError> {
    let normalized = insert_concatenation(regex);
    let postfix = to_postfix(&normalized)?;
    let syntax_tree = build_syntax_tree(&postfix)?;
    let nfa = build_nfa(&syntax_tree);
    let alphabet = nfa.alphabet();
    let dfa = subset_construction(&nfa, &alphabet);
    let min_dfa = minimize(&dfa, &alphabet);

    Ok(Compilation {
        regex: regex.to_string(),
        normalized,
        postfix,
        syntax_tree,
        nfa,
        alphabet,
        dfa,
        min_dfa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_artifacts() {
        let compilation = compile("a(b|c)*d").unwrap();
        assert_eq!(compilation.regex, "a(b|c)*d");
        assert_eq!(compilation.normalized, "a.(b|c)*.d");
        assert_eq!(compilation.postfix, "abc|*.d.");
        assert_eq!(compilation.alphabet, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_acceptance_query() {
        let compilation = compile("a(b|c)*d").unwrap();
        assert!(compilation.accepts("ad"));
        assert!(compilation.accepts("abcbcd"));
        assert!(!compilation.accepts("a"));
        assert!(!compilation.accepts("abc"));
        assert!(!compilation.accepts("d"));
    }

    #[test]
    fn test_empty_pattern_fails() {
        assert_eq!(compile(""), Err(CompileError::EmptyPattern));
        assert_eq!(compile("()"), Err(CompileError::EmptyPattern));
    }

    #[test]
    fn test_malformed_patterns_fail_fast() {
        assert!(matches!(
            compile("a)b("),
            Err(CompileError::UnbalancedParen { .. })
        ));
        assert!(matches!(
            compile("*a"),
            Err(CompileError::MissingOperand { operator: '*', .. })
        ));
        assert!(matches!(
            compile("a|"),
            Err(CompileError::MissingOperand { operator: '|', .. })
        ));
    }
}
