//! Subset construction: epsilon-NFA → DFA.
//!
//! The standard powerset construction, discovered lazily:
//! 1. The DFA start state is the epsilon-closure of the NFA start.
//! 2. A worklist queue drives discovery: for each pending state set and
//!    each alphabet symbol, union the symbol's targets across the set and
//!    close under epsilon; unseen closed sets become fresh DFA states.
//! 3. A DFA state accepts iff its NFA set contains an accepting state.
//!
//! Only symbols with a non-empty closed move-set get a transition, so the
//! resulting DFA is partial — a missing entry means "no path", not an
//! error, and no sink state is added.

use std::collections::{HashMap, VecDeque};

use crate::automata::{Dfa, Nfa, StateId};

/// Compute the epsilon closure of a set of NFA states: all states
/// reachable via zero or more epsilon transitions, sorted and deduplicated
/// so the result is usable as a value-equality key.
pub fn epsilon_closure(nfa: &Nfa, states: &[StateId]) -> Vec<StateId> {
    let mut closure: Vec<StateId> = states.to_vec();
    let mut stack: Vec<StateId> = states.to_vec();
    let mut visited = vec![false; nfa.states.len()];

    for &s in states {
        visited[s as usize] = true;
    }

    while let Some(state) = stack.pop() {
        for &target in &nfa.states[state as usize].epsilon {
            if !visited[target as usize] {
                visited[target as usize] = true;
                closure.push(target);
                stack.push(target);
            }
        }
    }

    closure.sort_unstable();
    closure.dedup();
    closure
}

/// Convert an NFA to a DFA over the given alphabet.
///
/// `alphabet` is the NFA's effective input alphabet ([`Nfa::alphabet`]);
/// iterating it in its sorted order keeps state discovery deterministic,
/// so equal inputs always produce identical DFAs.
pub fn subset_construction(nfa: &Nfa, alphabet: &[char]) -> Dfa {
    let mut dfa = Dfa { states: Vec::new(), start: 0 };

    // Closed NFA state set → DFA state id. Keys are sorted Vecs, so the
    // lookup is by set membership, not allocation order.
    let mut state_map: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut queue: VecDeque<Vec<StateId>> = VecDeque::new();

    let start_set = epsilon_closure(nfa, &[nfa.start]);
    let start_id = dfa.add_state();
    dfa.states[start_id as usize].accepting = contains_accepting(nfa, &start_set);
    state_map.insert(start_set.clone(), start_id);
    queue.push_back(start_set);

    while let Some(current_set) = queue.pop_front() {
        let current_id = *state_map
            .get(&current_set)
            .expect("queued set is always registered first");

        for &symbol in alphabet {
            // move(current_set, symbol): union of the symbol's targets
            // across every state in the set.
            let mut target_set: Vec<StateId> = Vec::new();
            for &nfa_state in &current_set {
                for &(label, target) in &nfa.states[nfa_state as usize].transitions {
                    if label == symbol {
                        target_set.push(target);
                    }
                }
            }

            if target_set.is_empty() {
                continue; // no transition under this symbol
            }

            let target_set = epsilon_closure(nfa, &target_set);

            let target_id = if let Some(&existing) = state_map.get(&target_set) {
                existing
            } else {
                let new_id = dfa.add_state();
                dfa.states[new_id as usize].accepting = contains_accepting(nfa, &target_set);
                state_map.insert(target_set.clone(), new_id);
                queue.push_back(target_set);
                new_id
            };

            dfa.states[current_id as usize]
                .transitions
                .insert(symbol, target_id);
        }
    }

    dfa
}

/// Whether any NFA state in the set is accepting.
fn contains_accepting(nfa: &Nfa, states: &[StateId]) -> bool {
    states.iter().any(|&s| nfa.states[s as usize].accepting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::thompson::build_nfa;
    use crate::syntax_tree::build_syntax_tree;

    fn dfa_for(postfix: &str) -> Dfa {
        let tree = build_syntax_tree(postfix).unwrap();
        let nfa = build_nfa(&tree);
        let alphabet = nfa.alphabet();
        subset_construction(&nfa, &alphabet)
    }

    #[test]
    fn test_epsilon_closure_chain() {
        let mut nfa = Nfa { states: Vec::new(), start: 0, accept: 0 };
        let s0 = nfa.add_state();
        let s1 = nfa.add_state();
        let s2 = nfa.add_state();
        let s3 = nfa.add_state();
        nfa.add_epsilon(s0, s1);
        nfa.add_epsilon(s1, s2);
        nfa.add_transition(s2, s3, 'a'); // labeled edge is not followed

        assert_eq!(epsilon_closure(&nfa, &[s0]), vec![s0, s1, s2]);
        assert_eq!(epsilon_closure(&nfa, &[s3]), vec![s3]);
    }

    #[test]
    fn test_epsilon_closure_cycle() {
        let mut nfa = Nfa { states: Vec::new(), start: 0, accept: 0 };
        let s0 = nfa.add_state();
        let s1 = nfa.add_state();
        nfa.add_epsilon(s0, s1);
        nfa.add_epsilon(s1, s0);

        assert_eq!(epsilon_closure(&nfa, &[s0]), vec![s0, s1]);
    }

    #[test]
    fn test_start_state_is_zero() {
        let dfa = dfa_for("ab.");
        assert_eq!(dfa.start, 0);
    }

    #[test]
    fn test_determinism() {
        // BTreeMap keys are unique, but also check every state has at most
        // one target per alphabet symbol after construction.
        let dfa = dfa_for("ab.c|*");
        for state in &dfa.states {
            let mut symbols: Vec<char> = state.transitions.keys().copied().collect();
            symbols.dedup();
            assert_eq!(symbols.len(), state.transitions.len());
        }
    }

    #[test]
    fn test_partial_dfa_rejects_on_missing_transition() {
        let dfa = dfa_for("ab.");
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("ba")); // no 'b' edge from the start state
        assert!(!dfa.accepts("abb"));
    }

    #[test]
    fn test_acceptance_from_nfa_set() {
        // a* — the start closure contains the NFA accept, so DFA state 0
        // accepts the empty string.
        let dfa = dfa_for("a*");
        assert!(dfa.states[dfa.start as usize].accepting);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("aaa"));
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn test_duplicate_sets_are_shared() {
        // a* loops back to the same closed set — the DFA must not grow a
        // fresh state per repetition.
        let dfa = dfa_for("a*");
        assert_eq!(dfa.states.len(), 2);
        assert_eq!(dfa.transition(1, 'a'), Some(1));
    }
}
