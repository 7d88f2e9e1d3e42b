use std::collections::HashMap;

use log::{debug, trace};
use priority_queue::PriorityQueue;

use super::{Mdp, ValueIterationAgent};
use crate::util::Priority;

/// All states that reach a state with nonzero probability.
///
/// Only non-terminal states are recorded as predecessors.
/// The predecessors are listed in enumeration order without duplicates.
pub fn predecessors<M: Mdp>(mdp: &M) -> HashMap<M::State, Vec<M::State>> {
    let mut result: HashMap<M::State, Vec<M::State>> = HashMap::new();
    for state in mdp.states() {
        if mdp.is_terminal(&state) {
            continue;
        }
        for action in mdp.possible_actions(&state) {
            for (next, prob) in mdp.transitions(&state, &action) {
                if prob > 0.0 {
                    let preds = result.entry(next).or_default();
                    if !preds.contains(&state) {
                        preds.push(state.clone());
                    }
                }
            }
        }
    }
    result
}

impl<'a, M: Mdp> ValueIterationAgent<'a, M> {
    /// Change a backup of `state` would make.
    /// Infinite for states without actions.
    fn residual(&self, state: &M::State) -> f64 {
        match self.max_q_value(state) {
            Some(q) => (q - self.value(state)).abs(),
            None => f64::INFINITY,
        }
    }

    /// Backs up the state with the largest residual until `iterations`
    /// states are popped or the queue runs empty.
    pub(super) fn run_sweeping(&mut self, iterations: usize, theta: f64) -> usize {
        let preds = predecessors(self.mdp);

        // the initial queue contains every state, regardless of theta
        let mut queue = PriorityQueue::new();
        for state in self.mdp.states() {
            if !self.mdp.is_terminal(&state) {
                let residual = self.residual(&state);
                queue.push(state, Priority(residual));
            }
        }
        debug!("sweeping: {} states queued", queue.len());

        let mut pops = 0;
        while pops < iterations {
            let Some((state, Priority(residual))) = queue.pop() else {
                break;
            };
            pops += 1;

            if !self.mdp.is_terminal(&state) {
                self.backup(&state);
            }
            trace!("sweeping {pops}: {state:?} ({residual}) = {}", self.value(&state));

            for pred in preds.get(&state).into_iter().flatten() {
                if self.mdp.is_terminal(pred) {
                    continue;
                }
                let residual = self.residual(pred);
                if residual > theta {
                    queue.push_increase(pred.clone(), Priority(residual));
                }
            }
        }
        pops
    }
}
