//! Thompson's construction: syntax tree → epsilon-NFA.
//!
//! Each tree node becomes a small NFA fragment with one start and one
//! accept state; fragments compose by epsilon-edge splicing. Accept flags
//! of sub-fragments are cleared before splicing, so at every step the
//! fragment under construction has exactly one accepting state.

use crate::syntax_tree::SyntaxNode;
use crate::automata::{Nfa, StateId};

/// An NFA fragment: start and accept state of a sub-automaton. Transient —
/// only used while the recursive build composes fragments.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

/// Build a complete epsilon-NFA from a syntax tree.
///
/// The returned NFA's start and accept states are those of the root
/// fragment; the accept state is the single accepting state.
pub fn build_nfa(root: &SyntaxNode) -> Nfa {
    let mut nfa = Nfa { states: Vec::new(), start: 0, accept: 0 };
    let fragment = build_fragment(&mut nfa, root);
    nfa.start = fragment.start;
    nfa.accept = fragment.accept;
    nfa
}

fn build_fragment(nfa: &mut Nfa, node: &SyntaxNode) -> Fragment {
    match node {
        SyntaxNode::Symbol(symbol) => leaf_fragment(nfa, Some(*symbol)),
        SyntaxNode::Epsilon => leaf_fragment(nfa, None),

        SyntaxNode::Concat(left, right) => {
            let left = build_fragment(nfa, left);
            let right = build_fragment(nfa, right);

            // Left's accept is no longer final; splice it to right's start.
            nfa.states[left.accept as usize].accepting = false;
            nfa.add_epsilon(left.accept, right.start);

            Fragment { start: left.start, accept: right.accept }
        }

        SyntaxNode::Alternation(left, right) => {
            let left = build_fragment(nfa, left);
            let right = build_fragment(nfa, right);

            nfa.states[left.accept as usize].accepting = false;
            nfa.states[right.accept as usize].accepting = false;

            let start = nfa.add_state();
            let accept = nfa.add_state();
            nfa.states[accept as usize].accepting = true;

            nfa.add_epsilon(start, left.start);
            nfa.add_epsilon(start, right.start);
            nfa.add_epsilon(left.accept, accept);
            nfa.add_epsilon(right.accept, accept);

            Fragment { start, accept }
        }

        SyntaxNode::Star(child) => {
            let child = build_fragment(nfa, child);

            nfa.states[child.accept as usize].accepting = false;

            let start = nfa.add_state();
            let accept = nfa.add_state();
            nfa.states[accept as usize].accepting = true;

            nfa.add_epsilon(start, child.start); // enter the loop
            nfa.add_epsilon(start, accept); // zero repetitions
            nfa.add_epsilon(child.accept, child.start); // repeat
            nfa.add_epsilon(child.accept, accept); // exit after ≥1

            Fragment { start, accept }
        }
    }
}

/// Two fresh states joined by a single transition: a labeled edge for a
/// symbol leaf, an epsilon edge for an epsilon leaf.
fn leaf_fragment(nfa: &mut Nfa, symbol: Option<char>) -> Fragment {
    let start = nfa.add_state();
    let accept = nfa.add_state();
    nfa.states[accept as usize].accepting = true;

    match symbol {
        Some(symbol) => nfa.add_transition(start, accept, symbol),
        None => nfa.add_epsilon(start, accept),
    }

    Fragment { start, accept }
}
