//! Planning in fully known Markov decision processes.

mod value_iteration;
pub use value_iteration::*;
mod asynchronous;
mod sweeping;
pub use sweeping::predecessors;
mod gridworld;
pub use gridworld::*;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A Markov decision process with a known model.
pub trait Mdp {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    /// All states in a fixed enumeration order.
    fn states(&self) -> Vec<Self::State>;
    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;
    /// Successors of taking `action` in `state` with their probabilities.
    fn transitions(&self, state: &Self::State, action: &Self::Action) -> Vec<(Self::State, f64)>;
    fn reward(&self, state: &Self::State, action: &Self::Action, next: &Self::State) -> f64;
    fn is_terminal(&self, state: &Self::State) -> bool;
}

/// State values, every known state starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable<S: Eq + Hash> {
    values: HashMap<S, f64>,
}

impl<S: Clone + Eq + Hash> ValueTable<S> {
    pub fn new(states: &[S]) -> Self {
        Self {
            values: states.iter().map(|s| (s.clone(), 0.0)).collect(),
        }
    }

    /// Unknown states have the value zero.
    pub fn get(&self, state: &S) -> f64 {
        self.values.get(state).copied().unwrap_or_default()
    }

    pub fn set(&mut self, state: S, value: f64) {
        self.values.insert(state, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.values.iter().map(|(s, v)| (s, *v))
    }
}

/// The order in which the states are backed up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Every iteration updates all states from the previous values.
    #[default]
    Batch,
    /// Every iteration updates a single state in place, round robin.
    Cyclic,
    /// Every iteration updates the state with the largest pending change.
    /// Predecessors are only queued if their change exceeds `theta`.
    PrioritizedSweeping { theta: f64 },
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn value_table_defaults() {
        let mut table = ValueTable::new(&["a", "b"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"a"), 0.0);
        assert_eq!(table.get(&"unknown"), 0.0);
        table.set("b", 2.5);
        assert_eq!(table.get(&"b"), 2.5);
        assert_eq!(table.iter().map(|(_, v)| v).sum::<f64>(), 2.5);
    }

    #[test]
    fn schedule_config() {
        let s: Schedule = serde_json::from_str(r#"{"prioritized_sweeping":{"theta":1e-5}}"#).unwrap();
        assert_eq!(s, Schedule::PrioritizedSweeping { theta: 1e-5 });
        let s: Schedule = serde_json::from_str(r#""cyclic""#).unwrap();
        assert_eq!(s, Schedule::Cyclic);
    }
}
