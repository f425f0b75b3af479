//! Protocol class parameter records.

use super::error::ModelViolation;
use super::priority::UserPriority;
use crate::core::{events_between, ChainState, TransitionEvent, STATE_COUNT};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Absolute tolerance for probability sums.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Row-stochastic transition matrix of the chain.
pub type TransitionMatrix = [[f64; STATE_COUNT]; STATE_COUNT];

/// Per-state probabilities of one protocol class.
///
/// Success, collision and idle partition the unit interval: they must sum
/// to 1 within [`PROBABILITY_TOLERANCE`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateParams {
    /// Probability that the device attempts transmission in a slot
    pub contention_probability: f64,
    pub success_probability: f64,
    pub collision_probability: f64,
    pub idle_probability: f64,
}

impl StateParams {
    pub const fn new(contention: f64, success: f64, collision: f64, idle: f64) -> Self {
        Self {
            contention_probability: contention,
            success_probability: success,
            collision_probability: collision,
            idle_probability: idle,
        }
    }

    /// Probability of a single outcome.
    pub fn probability(&self, event: TransitionEvent) -> f64 {
        match event {
            TransitionEvent::Success => self.success_probability,
            TransitionEvent::Collision => self.collision_probability,
            TransitionEvent::Idle => self.idle_probability,
        }
    }

    /// Classify a uniform draw against this state's thresholds.
    pub fn classify(&self, draw: f64) -> TransitionEvent {
        TransitionEvent::classify(draw, self.success_probability, self.collision_probability)
    }

    fn validate(
        &self,
        class: UserPriority,
        state: ChainState,
    ) -> Validation<(), NonEmptyVec<ModelViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ModelViolation>>> = Vec::new();

        let cp = self.contention_probability;
        checks.push(if in_unit_interval(cp) {
            Validation::success(())
        } else {
            Validation::fail(ModelViolation::ContentionOutOfRange {
                class,
                state,
                value: cp,
            })
        });

        let mut all_outcomes_valid = true;
        for event in TransitionEvent::ALL {
            let value = self.probability(event);
            let valid = value.is_finite() && value >= 0.0;
            all_outcomes_valid &= valid;
            checks.push(if valid {
                Validation::success(())
            } else {
                Validation::fail(ModelViolation::InvalidOutcomeProbability {
                    class,
                    state,
                    outcome: event.label(),
                    value,
                })
            });
        }

        // A sum over non-finite entries says nothing new.
        if all_outcomes_valid {
            let sum = self.success_probability + self.collision_probability + self.idle_probability;
            checks.push(if (sum - 1.0).abs() <= PROBABILITY_TOLERANCE {
                Validation::success(())
            } else {
                Validation::fail(ModelViolation::OutcomesNotNormalized { class, state, sum })
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Parameter set of one priority class.
///
/// The state array has exactly three entries, one per [`ChainState`].
/// `steady_state` holds the precomputed long-run distribution shown to
/// users; it is authoritative for display and is not derived at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolClass {
    pub id: UserPriority,
    /// Display name, e.g. "UP0 (Low Priority)"
    pub name: String,
    /// Display color as a hex string
    pub color: String,
    pub contention_probability_max: f64,
    pub contention_probability_min: f64,
    pub states: [StateParams; STATE_COUNT],
    pub steady_state: [f64; STATE_COUNT],
}

impl ProtocolClass {
    /// Parameters of a chain state.
    pub fn params(&self, state: ChainState) -> &StateParams {
        &self.states[state.index()]
    }

    /// Stored steady-state probability of a chain state.
    pub fn steady_state_of(&self, state: ChainState) -> f64 {
        self.steady_state[state.index()]
    }

    /// Probability mass of the directed edge `from → to`.
    ///
    /// Sums the outcomes that the rule table maps onto the edge, so the
    /// self-loop at 0 carries success + idle and the boundary self-loop
    /// carries collision + idle. Edges outside the chain's support weigh 0.
    pub fn edge_weight(&self, from: ChainState, to: ChainState) -> f64 {
        let params = self.params(from);
        events_between(from, to)
            .map(|event| params.probability(event))
            .sum()
    }

    /// Transition matrix implied by the rule table.
    pub fn transition_matrix(&self) -> TransitionMatrix {
        let mut matrix = [[0.0; STATE_COUNT]; STATE_COUNT];
        for from in ChainState::ALL {
            for to in ChainState::ALL {
                matrix[from.index()][to.index()] = self.edge_weight(from, to);
            }
        }
        matrix
    }

    /// Solve `π = πP` with `Σπ = 1` for this class's transition matrix.
    ///
    /// Returns `None` when the system is singular, e.g. when the boundary
    /// state can never be left.
    pub fn stationary_distribution(&self) -> Option<[f64; STATE_COUNT]> {
        solve_stationary(&self.transition_matrix())
    }

    /// Largest absolute gap between the stored steady state and the solved
    /// stationary distribution. Informational only.
    pub fn steady_state_deviation(&self) -> Option<f64> {
        let solved = self.stationary_distribution()?;
        Some(
            solved
                .iter()
                .zip(self.steady_state.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Check every model invariant, collecting all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ModelViolation>> {
        let class = self.id;
        let mut checks: Vec<Validation<(), NonEmptyVec<ModelViolation>>> = Vec::new();

        for value in [
            self.contention_probability_max,
            self.contention_probability_min,
        ] {
            checks.push(if in_unit_interval(value) {
                Validation::success(())
            } else {
                Validation::fail(ModelViolation::ContentionBoundOutOfRange { class, value })
            });
        }

        for state in ChainState::ALL {
            checks.push(self.params(state).validate(class, state));
        }

        let mut all_entries_valid = true;
        for state in ChainState::ALL {
            let value = self.steady_state_of(state);
            let valid = value.is_finite() && value >= 0.0;
            all_entries_valid &= valid;
            checks.push(if valid {
                Validation::success(())
            } else {
                Validation::fail(ModelViolation::InvalidSteadyStateEntry {
                    class,
                    state,
                    value,
                })
            });
        }

        if all_entries_valid {
            let sum: f64 = self.steady_state.iter().sum();
            checks.push(if (sum - 1.0).abs() <= PROBABILITY_TOLERANCE {
                Validation::success(())
            } else {
                Validation::fail(ModelViolation::SteadyStateNotNormalized { class, sum })
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Gaussian elimination with partial pivoting on `(Pᵀ - I)π = 0`, with the
/// last balance equation replaced by the normalization row.
fn solve_stationary(matrix: &TransitionMatrix) -> Option<[f64; STATE_COUNT]> {
    const N: usize = STATE_COUNT;
    let mut a = [[0.0; N + 1]; N];

    for (row, equation) in a.iter_mut().enumerate() {
        for col in 0..N {
            equation[col] = matrix[col][row] - if row == col { 1.0 } else { 0.0 };
        }
    }
    a[N - 1] = [1.0; N + 1];

    for col in 0..N {
        let pivot = (col..N).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);

        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..=N {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut pi = [0.0; N];
    for (i, value) in pi.iter_mut().enumerate() {
        *value = a[i][N] / a[i][i];
    }
    Some(pi)
}
