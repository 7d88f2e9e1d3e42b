use log::trace;

use super::{Mdp, ValueIterationAgent};

impl<'a, M: Mdp> ValueIterationAgent<'a, M> {
    /// Backs up one state per iteration in enumeration order.
    /// Updates are visible to the following backups immediately.
    pub(super) fn run_cyclic(&mut self, iterations: usize) -> usize {
        let states = self.mdp.states();
        if states.is_empty() {
            return 0;
        }

        for i in 0..iterations {
            let state = &states[i % states.len()];
            if !self.mdp.is_terminal(state) {
                self.backup(state);
                trace!("cyclic {i}: {:?} = {}", state, self.value(state));
            }
        }
        iterations
    }
}
