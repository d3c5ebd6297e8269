//! Automaton data model shared by the construction stages.
//!
//! States live in growable arenas ([`Nfa`], [`Dfa`]) and reference each
//! other by integer id, so the cyclic graphs Kleene star produces need no
//! ownership links, and structural dumps fall out of the id-based edge
//! lists for free. The arena owns the id counter: `add_state` hands out
//! fresh sequential ids for the lifetime of one pipeline run.

pub mod minimize;
pub mod subset;
pub mod thompson;

use std::collections::BTreeMap;

use serde::Serialize;

/// Identifier for an automaton state.
pub type StateId = u32;

/// NFA state: multi-valued transitions per symbol plus epsilon edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaState {
    /// Labeled transitions: (symbol, target state). Multiple targets per
    /// symbol are meaningful — NFAs are multi-valued.
    pub transitions: Vec<(char, StateId)>,
    /// Epsilon transitions: targets reachable without consuming input.
    pub epsilon: Vec<StateId>,
    /// Whether this state is accepting.
    pub accepting: bool,
}

/// An epsilon-NFA: a state arena with designated start and accept states.
///
/// Thompson's construction guarantees exactly one accepting state; the
/// flags of spliced sub-fragments are cleared as the automaton is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: StateId,
    pub accept: StateId,
}

impl Nfa {
    /// Add a state to the arena and return its fresh id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(NfaState::default());
        id
    }

    /// Add a labeled transition `from --symbol--> to`.
    pub fn add_transition(&mut self, from: StateId, to: StateId, symbol: char) {
        self.states[from as usize].transitions.push((symbol, to));
    }

    /// Add an epsilon transition `from --ε--> to`.
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from as usize].epsilon.push(to);
    }

    /// The effective input alphabet: every non-epsilon symbol appearing on
    /// any transition, sorted and deduplicated.
    pub fn alphabet(&self) -> Vec<char> {
        let mut symbols: Vec<char> = self
            .states
            .iter()
            .flat_map(|s| s.transitions.iter().map(|&(symbol, _)| symbol))
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Simulate the NFA on `input` via epsilon-closure stepping.
    ///
    /// Used by the equivalence tests as the reference semantics the DFA
    /// stages are checked against.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = subset::epsilon_closure(self, &[self.start]);

        for symbol in input.chars() {
            let mut moved: Vec<StateId> = Vec::new();
            for &state in &current {
                for &(label, target) in &self.states[state as usize].transitions {
                    if label == symbol {
                        moved.push(target);
                    }
                }
            }
            if moved.is_empty() {
                return false;
            }
            current = subset::epsilon_closure(self, &moved);
        }

        current.iter().any(|&s| self.states[s as usize].accepting)
    }

    /// Enumerate states and transitions for external visualization.
    /// Epsilon edges carry the symbol `ε`.
    pub fn dump(&self) -> AutomatonDump {
        let states = self
            .states
            .iter()
            .enumerate()
            .map(|(id, state)| StateDump { id: id as StateId, accepting: state.accepting })
            .collect();

        let mut transitions = Vec::new();
        for (id, state) in self.states.iter().enumerate() {
            for &(symbol, to) in &state.transitions {
                transitions.push(TransitionDump { from: id as StateId, to, symbol });
            }
            for &to in &state.epsilon {
                transitions.push(TransitionDump { from: id as StateId, to, symbol: 'ε' });
            }
        }

        AutomatonDump { states, start: self.start, transitions }
    }
}

/// DFA state: at most one successor per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfaState {
    /// Single-valued transition map. Symbols with no entry mean "no path"
    /// — the DFA is partial, no sink state is materialized.
    pub transitions: BTreeMap<char, StateId>,
    pub accepting: bool,
}

/// A DFA (also used for the minimized DFA — same shape, fewer states).
///
/// `states` is indexed by state id. After minimization the start state is
/// whichever block contained the original start, so it need not be 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: StateId,
}

impl Dfa {
    /// Add a state to the arena and return its fresh id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(DfaState::default());
        id
    }

    /// Deterministic transition lookup: the successor of `state` under
    /// `symbol`, or `None` if the DFA has no path for it.
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.states[state as usize].transitions.get(&symbol).copied()
    }

    /// The alphabet of the DFA: every symbol with at least one transition,
    /// sorted and deduplicated.
    pub fn alphabet(&self) -> Vec<char> {
        let mut symbols: Vec<char> = self
            .states
            .iter()
            .flat_map(|s| s.transitions.keys().copied())
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Run the acceptance query: follow one transition per input char,
    /// rejecting immediately when none exists; accept iff the final state
    /// is accepting.
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start;
        for symbol in input.chars() {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.states[state as usize].accepting
    }

    /// Enumerate states and transitions for external visualization.
    pub fn dump(&self) -> AutomatonDump {
        let states = self
            .states
            .iter()
            .enumerate()
            .map(|(id, state)| StateDump { id: id as StateId, accepting: state.accepting })
            .collect();

        let mut transitions = Vec::new();
        for (id, state) in self.states.iter().enumerate() {
            for (&symbol, &to) in &state.transitions {
                transitions.push(TransitionDump { from: id as StateId, to, symbol });
            }
        }

        AutomatonDump { states, start: self.start, transitions }
    }
}

/// A state entry in a structural dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateDump {
    pub id: StateId,
    pub accepting: bool,
}

/// An edge entry in a structural dump. Epsilon edges use the symbol `ε`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionDump {
    pub from: StateId,
    pub to: StateId,
    pub symbol: char,
}

/// Structural dump of one automaton stage: the full state list, the start
/// state, and the edge list. Serialization to a concrete visualization
/// format is an external concern.
#[derive(Debug, Clone, Serialize)]
pub struct AutomatonDump {
    pub states: Vec<StateDump>,
    pub start: StateId,
    pub transitions: Vec<TransitionDump>,
}
