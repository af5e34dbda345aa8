//! Distinct permutations of a multiset, in lexicographic order.
//!
//! Orderings that only swap equal elements are produced once, so a multiset
//! with repeated entries yields `k! / (m1! * m2! * ...)` permutations instead
//! of `k!`.

#[derive(Debug, Clone)]
pub struct DistinctPermutations<T> {
	current: Vec<T>,
	done: bool,
}
impl<T: Ord + Clone> DistinctPermutations<T> {
	pub fn new(mut items: Vec<T>) -> Self {
		items.sort();
		Self { current: items, done: false }
	}
}
impl<T: Ord + Clone> Iterator for DistinctPermutations<T> {
	type Item = Vec<T>;

	fn next(&mut self) -> Option<Vec<T>> {
		if self.done {
			return None;
		}
		let item = self.current.clone();
		self.done = !next_permutation(&mut self.current);
		Some(item)
	}
}

/// Rearranges `items` into the next greater permutation. Returns `false` when
/// `items` already was the greatest one.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
	if items.len() < 2 {
		return false;
	}
	let mut i = items.len() - 1;
	while i > 0 && items[i-1] >= items[i] {
		i -= 1;
	}
	if i == 0 {
		return false;
	}
	let mut j = items.len() - 1;
	while items[j] <= items[i-1] {
		j -= 1;
	}
	items.swap(i-1, j);
	items[i..].reverse();
	true
}

/// Number of distinct permutations of `items`, `None` on overflow.
pub fn count_distinct<T: Ord>(items: &[T]) -> Option<u128> {
	let mut sorted: Vec<&T> = items.iter().collect();
	sorted.sort();
	// total * placed / run is integral at every step; dividing by the gcd
	// first keeps the intermediate no larger than the result
	let mut total: u128 = 1;
	let mut placed: u128 = 0;
	let mut run: u128 = 0;
	for (i, item) in sorted.iter().enumerate() {
		run = if i > 0 && sorted[i-1] == *item { run + 1 } else { 1 };
		placed += 1;
		let g = gcd(placed, run);
		total = (total / (run / g)).checked_mul(placed / g)?;
	}
	Some(total)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
	while b != 0 {
		(a, b) = (b, a % b);
	}
	a
}
