//! Request-level entry points: check a state, turn it, or make a random one.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::{
	budget::ColorBudget,
	completion::CompletionSearch,
	config::Settings,
	facelet::FaceletState,
	moves::{format_moves, parse_moves},
	oracle::{CubieOracle, SolvabilityOracle},
};



#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckResponse {
	Invalid { reason: String },
	/// Every face is one color already, `solution` is always empty.
	Solved { solution: String },
	/// Fully known and solvable, `solution` turns it back to solved.
	Valid { solution: String },
	Partial { count: usize, valid_completions: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApplyResponse {
	Ok { new_state: String },
	Invalid { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomStateResponse {
	pub state: String,
	pub scramble: String,
}



pub struct Checker<O = CubieOracle> {
	settings: Settings,
	oracle: O,
}
impl Checker<CubieOracle> {
	pub fn new(settings: Settings) -> Self {
		let oracle = CubieOracle::new(settings.alphabet, settings.witness_depth);
		Self { settings, oracle }
	}
}
impl<O: SolvabilityOracle> Checker<O> {
	pub fn with_oracle(settings: Settings, oracle: O) -> Self {
		Self { settings, oracle }
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn check(&self, text: &str) -> CheckResponse {
		let alphabet = &self.settings.alphabet;
		let state = match FaceletState::parse(text, alphabet) {
			Ok(state) => state,
			Err(err) => return CheckResponse::Invalid { reason: err.to_string() },
		};

		if state.is_solved_any_orientation() {
			debug!("already solved");
			return CheckResponse::Solved { solution: String::new() };
		}

		if !state.has_unknowns() {
			return match self.oracle.solve(&state) {
				Ok(solution) => {
					debug!(turns = solution.moves.len(), "full state solvable");
					CheckResponse::Valid { solution: format_moves(&solution.moves) }
				}
				Err(rejection) => {
					debug!(%rejection, "full state rejected");
					CheckResponse::Invalid { reason: rejection.to_string() }
				}
			};
		}

		let budget = match ColorBudget::compute(&state, alphabet) {
			Ok(budget) => budget,
			Err(err) => {
				debug!(%err, "infeasible color budget");
				return CheckResponse::Invalid { reason: err.to_string() };
			}
		};
		let results = CompletionSearch::new(&self.oracle, self.settings.result_cap, self.settings.batch_size)
			.run(&state, &budget);
		CheckResponse::Partial {
			count: results.count(),
			valid_completions: results
				.completions
				.iter()
				.map(|completion| completion.render(alphabet))
				.collect(),
		}
	}

	/// Applies one turn, or a whitespace separated sequence of turns.
	pub fn apply_moves(&self, text: &str, notation: &str) -> ApplyResponse {
		let alphabet = &self.settings.alphabet;
		let mut state = match FaceletState::parse(text, alphabet) {
			Ok(state) => state,
			Err(err) => return ApplyResponse::Invalid { reason: err.to_string() },
		};
		let moves = match parse_moves(notation) {
			Ok(moves) => moves,
			Err(err) => {
				debug!(token = %err.token, "unparsable move");
				return ApplyResponse::Invalid { reason: err.to_string() };
			}
		};
		state.make_moves(&moves);
		ApplyResponse::Ok { new_state: state.render(alphabet) }
	}

	pub fn random_state<R: Rng>(&self, rng: &mut R) -> RandomStateResponse {
		let (state, moves) = FaceletState::new_shuffled(self.settings.scramble_length, rng);
		RandomStateResponse {
			state: state.render(&self.settings.alphabet),
			scramble: format_moves(&moves),
		}
	}
}
