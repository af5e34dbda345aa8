//! Completion search: which colorings of the unknown stickers give a solvable cube.
//!
//! Every distinct permutation of the missing-color multiset is written into
//! the unknown positions and handed to the oracle. Candidates go to the oracle
//! in batches evaluated with rayon; accepted ones are kept in generation order
//! and the search stops as soon as `result_cap` of them are found.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, trace};

use crate::{
	budget::ColorBudget,
	facelet::FaceletState,
	oracle::SolvabilityOracle,
	permutations::{count_distinct, DistinctPermutations},
};



#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
	pub completions: Vec<FaceletState>,
	/// Candidates submitted to the oracle.
	pub explored: usize,
}
impl ResultSet {
	pub fn count(&self) -> usize {
		self.completions.len()
	}
}

pub struct CompletionSearch<'a, O: SolvabilityOracle + ?Sized> {
	oracle: &'a O,
	result_cap: usize,
	batch_size: usize,
}
impl<'a, O: SolvabilityOracle + ?Sized> CompletionSearch<'a, O> {
	pub fn new(oracle: &'a O, result_cap: usize, batch_size: usize) -> Self {
		Self {
			oracle,
			result_cap: result_cap.max(1),
			batch_size: batch_size.max(1),
		}
	}

	pub fn run(&self, source: &FaceletState, budget: &ColorBudget) -> ResultSet {
		let positions = budget.unknown_positions();
		let multiset = budget.multiset();
		debug!(
			unknown = positions.len(),
			space = ?count_distinct(&multiset),
			cap = self.result_cap,
			"completion search started"
		);

		let mut permutations = DistinctPermutations::new(multiset);
		let mut results = ResultSet::default();
		loop {
			let batch: Vec<FaceletState> = permutations
				.by_ref()
				.take(self.batch_size)
				.map(|colors| source.with_colors_at(positions, &colors))
				.collect();
			if batch.is_empty() {
				break;
			}
			results.explored += batch.len();

			// collect keeps the batch order, so acceptance order is generation order
			let verdicts: Vec<bool> = batch
				.par_iter()
				.map(|candidate| match self.oracle.verify(candidate) {
					Ok(()) => true,
					Err(rejection) => {
						trace!(%rejection, "candidate rejected");
						false
					}
				})
				.collect();

			for (candidate, accepted) in batch.into_iter().zip(verdicts) {
				if !accepted {
					continue;
				}
				results.completions.push(candidate);
				if results.count() >= self.result_cap {
					debug!(explored = results.explored, "completion search capped");
					return results;
				}
			}
		}

		debug!(explored = results.explored, found = results.count(), "completion search exhausted");
		results
	}
}
