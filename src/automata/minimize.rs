//! DFA minimization by partition refinement.
//!
//! Starts from the coarse partition {accepting, non-accepting} over the
//! reachable states and repeatedly splits blocks whose members disagree on
//! which block some alphabet symbol leads to, until a full pass changes
//! nothing. One minimized state is then built per block.
//!
//! This is the naive fixed-point refinement, deliberately: each round costs
//! O(states × alphabet) and rounds repeat until stable, not the
//! worklist-driven splitter selection of true Hopcroft's algorithm. The
//! output is the same minimal automaton; only large inputs pay for it.

use std::collections::{BTreeMap, VecDeque};

use crate::automata::{Dfa, StateId};

/// Signature of a state within the current partition: the block index its
/// transition leads to for each alphabet symbol in order, `None` when the
/// state has no transition for that symbol.
type Signature = Vec<Option<usize>>;

/// Minimize a DFA over the given alphabet.
///
/// Unreachable states are dropped (never visited), equivalent states are
/// merged. Minimized state ids are block indices; the start state is the
/// block containing the original start, which need not be id 0.
pub fn minimize(dfa: &Dfa, alphabet: &[char]) -> Dfa {
    // Step 1: reachable states only. Subset construction already produces
    // a reachable DFA, but minimization must not depend on that.
    let reachable = reachable_states(dfa);

    // Step 2: initial partition — non-accepting block then accepting
    // block, empty blocks omitted.
    let (accepting, non_accepting): (Vec<StateId>, Vec<StateId>) = reachable
        .iter()
        .partition(|&&s| dfa.states[s as usize].accepting);

    let mut partitions: Vec<Vec<StateId>> = Vec::new();
    if !non_accepting.is_empty() {
        partitions.push(non_accepting);
    }
    if !accepting.is_empty() {
        partitions.push(accepting);
    }

    // Step 3: refine to a fixed point.
    loop {
        let block_of = block_index(dfa, &partitions);
        let mut new_partitions: Vec<Vec<StateId>> = Vec::new();
        let mut changed = false;

        for block in &partitions {
            // Group the block's members by signature. BTreeMap keeps the
            // group order deterministic across runs.
            let mut groups: BTreeMap<Signature, Vec<StateId>> = BTreeMap::new();
            for &state in block {
                let signature: Signature = alphabet
                    .iter()
                    .map(|&symbol| {
                        dfa.transition(state, symbol)
                            .map(|target| block_of[target as usize])
                    })
                    .collect();
                groups.entry(signature).or_default().push(state);
            }

            if groups.len() > 1 {
                changed = true;
                new_partitions.extend(groups.into_values());
            } else {
                new_partitions.push(block.clone());
            }
        }

        partitions = new_partitions;
        if !changed {
            break;
        }
    }

    // Step 4: one minimized state per block, id = block index.
    let block_of = block_index(dfa, &partitions);
    let mut min_dfa = Dfa { states: Vec::new(), start: 0 };

    for block in &partitions {
        let id = min_dfa.add_state();
        // All members agree on acceptance by the initial-partition
        // invariant; any member decides.
        min_dfa.states[id as usize].accepting =
            block.iter().any(|&s| dfa.states[s as usize].accepting);
    }

    for (index, block) in partitions.iter().enumerate() {
        // All members agree on target blocks at convergence; a single
        // representative decides the transitions.
        let representative = block[0];
        for &symbol in alphabet {
            if let Some(target) = dfa.transition(representative, symbol) {
                min_dfa.states[index]
                    .transitions
                    .insert(symbol, block_of[target as usize] as StateId);
            }
        }

        if block.contains(&dfa.start) {
            min_dfa.start = index as StateId;
        }
    }

    min_dfa
}

/// States reachable from the DFA start, breadth-first.
fn reachable_states(dfa: &Dfa) -> Vec<StateId> {
    let mut visited = vec![false; dfa.states.len()];
    let mut queue: VecDeque<StateId> = VecDeque::new();
    let mut reachable: Vec<StateId> = Vec::new();

    visited[dfa.start as usize] = true;
    queue.push_back(dfa.start);

    while let Some(state) = queue.pop_front() {
        reachable.push(state);
        for &target in dfa.states[state as usize].transitions.values() {
            if !visited[target as usize] {
                visited[target as usize] = true;
                queue.push_back(target);
            }
        }
    }

    reachable.sort_unstable();
    reachable
}

/// Map each state id to the index of the block containing it. Unreachable
/// states keep a placeholder entry that refinement never reads.
fn block_index(dfa: &Dfa, partitions: &[Vec<StateId>]) -> Vec<usize> {
    let mut block_of = vec![usize::MAX; dfa.states.len()];
    for (index, block) in partitions.iter().enumerate() {
        for &state in block {
            block_of[state as usize] = index;
        }
    }
    block_of
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::subset::subset_construction;
    use crate::automata::thompson::build_nfa;
    use crate::syntax_tree::build_syntax_tree;

    fn pipeline(postfix: &str) -> (Dfa, Dfa) {
        let tree = build_syntax_tree(postfix).unwrap();
        let nfa = build_nfa(&tree);
        let alphabet = nfa.alphabet();
        let dfa = subset_construction(&nfa, &alphabet);
        let min = minimize(&dfa, &alphabet);
        (dfa, min)
    }

    #[test]
    fn test_merges_equivalent_accept_states() {
        // ab|ac: the DFA ends in two distinct accepting states (after b
        // and after c) that behave identically — minimization merges them.
        let (dfa, min) = pipeline("ab.ac.|");
        assert_eq!(dfa.states.len(), 4);
        assert_eq!(min.states.len(), 3);
    }

    #[test]
    fn test_already_minimal_is_unchanged_in_size() {
        let (dfa, min) = pipeline("ab.");
        assert_eq!(dfa.states.len(), min.states.len());
    }

    #[test]
    fn test_language_preserved() {
        let (dfa, min) = pipeline("ab.ac.|");
        for input in ["ab", "ac", "a", "b", "", "abc", "aa"] {
            assert_eq!(dfa.accepts(input), min.accepts(input), "input {input:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let (_, min) = pipeline("ab.c|*");
        let alphabet = min.alphabet();
        let min_again = minimize(&min, &alphabet);

        assert_eq!(min.states.len(), min_again.states.len());
        let accepting = |d: &Dfa| d.states.iter().filter(|s| s.accepting).count();
        assert_eq!(accepting(&min), accepting(&min_again));
        let edges = |d: &Dfa| d.states.iter().map(|s| s.transitions.len()).sum::<usize>();
        assert_eq!(edges(&min), edges(&min_again));
    }

    #[test]
    fn test_unreachable_states_dropped() {
        // Hand-build a DFA with an unreachable accepting state.
        let mut dfa = Dfa { states: Vec::new(), start: 0 };
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        let s2 = dfa.add_state(); // unreachable
        dfa.states[s1 as usize].accepting = true;
        dfa.states[s2 as usize].accepting = true;
        dfa.states[s0 as usize].transitions.insert('a', s1);
        dfa.states[s2 as usize].transitions.insert('a', s2);

        let min = minimize(&dfa, &['a']);
        assert_eq!(min.states.len(), 2);
        assert!(min.accepts("a"));
        assert!(!min.accepts(""));
    }

    #[test]
    fn test_accepting_start_preserved() {
        // a* — every state of the DFA accepts, so they collapse into a
        // single accepting block that is also the start.
        let (_, min) = pipeline("a*");
        assert!(min.states[min.start as usize].accepting);
        assert!(min.accepts(""));
        assert!(min.accepts("aaa"));
    }
}
