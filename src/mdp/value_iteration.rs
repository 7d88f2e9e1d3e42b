use std::time::Instant;

use log::{info, trace};

use super::{Mdp, Schedule, ValueTable};

/// Computes state values of a [`Mdp`] with Bellman backups.
///
/// `V(s) = max_a Σ_s' P(s'|s,a) [R(s,a,s') + discount V(s')]`
pub struct ValueIterationAgent<'a, M: Mdp> {
    pub(super) mdp: &'a M,
    pub(super) discount: f64,
    pub(super) values: ValueTable<M::State>,
}

impl<'a, M: Mdp> ValueIterationAgent<'a, M> {
    /// All values start at zero.
    pub fn new(mdp: &'a M, discount: f64) -> Self {
        Self {
            mdp,
            discount,
            values: ValueTable::new(&mdp.states()),
        }
    }

    pub fn solve(mdp: &'a M, discount: f64, schedule: Schedule, iterations: usize) -> Self {
        let mut agent = Self::new(mdp, discount);
        agent.run(schedule, iterations);
        agent
    }

    /// Runs `iterations` iterations of the given schedule.
    /// Returns the number of iterations done, sweeping may stop early.
    pub fn run(&mut self, schedule: Schedule, iterations: usize) -> usize {
        let start = Instant::now();
        let done = match schedule {
            Schedule::Batch => self.run_batch(iterations),
            Schedule::Cyclic => self.run_cyclic(iterations),
            Schedule::PrioritizedSweeping { theta } => self.run_sweeping(iterations, theta),
        };
        info!(
            "{:?}: {}/{} iterations in {}ms",
            schedule,
            done,
            iterations,
            start.elapsed().as_millis()
        );
        done
    }

    pub fn values(&self) -> &ValueTable<M::State> {
        &self.values
    }

    pub fn value(&self, state: &M::State) -> f64 {
        self.values.get(state)
    }

    pub fn q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.mdp
            .transitions(state, action)
            .into_iter()
            .map(|(next, prob)| {
                prob * (self.mdp.reward(state, action, &next) + self.discount * self.value(&next))
            })
            .sum()
    }

    /// Best Q-value of `state`, `None` if it has no actions.
    pub fn max_q_value(&self, state: &M::State) -> Option<f64> {
        self.mdp
            .possible_actions(state)
            .iter()
            .map(|a| self.q_value(state, a))
            .reduce(f64::max)
    }

    /// The first action with the best Q-value.
    pub fn policy(&self, state: &M::State) -> Option<M::Action> {
        let mut best: Option<(M::Action, f64)> = None;
        for action in self.mdp.possible_actions(state) {
            let q = self.q_value(state, &action);
            if best.as_ref().map_or(true, |(_, v)| q > *v) {
                best = Some((action, q));
            }
        }
        best.map(|(a, _)| a)
    }

    pub fn action(&self, state: &M::State) -> Option<M::Action> {
        self.policy(state)
    }

    /// Updates the value of `state` in place.
    /// States without actions keep their value.
    pub(super) fn backup(&mut self, state: &M::State) -> bool {
        match self.max_q_value(state) {
            Some(value) => {
                self.values.set(state.clone(), value);
                true
            }
            None => false,
        }
    }

    fn run_batch(&mut self, iterations: usize) -> usize {
        let states = self.mdp.states();
        for i in 0..iterations {
            // all backups of a round read the previous values
            let mut next = self.values.clone();
            for state in &states {
                if self.mdp.is_terminal(state) {
                    continue;
                }
                if let Some(value) = self.max_q_value(state) {
                    next.set(state.clone(), value);
                }
            }
            self.values = next;
            trace!("batch {i}: {:?}", self.values);
        }
        iterations
    }
}
