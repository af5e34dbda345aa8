//! Witness sequences by meet-in-the-middle search.
//!
//! Frontiers grow alternately from the scrambled state and from the solved
//! state until they share a state or the depth budget runs out. The budget
//! keeps memory bounded; states further than `max_depth` turns from solved
//! are left to the two-phase solver.

use std::cmp::Ordering;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::{
	facelet::{FACELETS_N, FACE_SIZE},
	moves::{invert_moves, turn, Move, ALL_MOVES},
};



/// Stickers labelled by face, plus the turns that led here.
#[derive(Debug, Clone)]
struct Node {
	pieces: [u8; FACELETS_N],
	path: Vec<Move>,
}
impl Node {
	fn new(pieces: [u8; FACELETS_N]) -> Self {
		Self { pieces, path: vec![] }
	}

	fn juxt(&self) -> [Node; 18] {
		ALL_MOVES.map(|move_| {
			let mut node = self.clone();
			turn(&mut node.pieces, move_);
			node.path.push(move_);
			node
		})
	}
}
// ordered by stickers only, the path is payload
impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.pieces == other.pieces
	}
}
impl Eq for Node {}
impl PartialOrd for Node {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for Node {
	fn cmp(&self, other: &Self) -> Ordering {
		self.pieces.cmp(&other.pieces)
	}
}

fn solved_faces() -> [u8; FACELETS_N] {
	let mut pieces = [0u8; FACELETS_N];
	for (i, piece) in pieces.iter_mut().enumerate() {
		*piece = (i / FACE_SIZE) as u8;
	}
	pieces
}

/// `start` holds face labels (see [`crate::oracle`]). Returns turns taking
/// `start` to the solved cube in at most `max_depth` moves, shortest first.
pub fn search(start: [u8; FACELETS_N], max_depth: u32) -> Option<Vec<Move>> {
	let goal = solved_faces();
	if start == goal {
		return Some(vec![]);
	}

	let mut left_rcs: SortedVec<Node> = SortedVec::from_array([Node::new(start)]);
	let mut right_rcs: SortedVec<Node> = SortedVec::from_array([Node::new(goal)]);
	let mut left_moves: u32 = 0;
	let mut right_moves: u32 = 0;

	let (left, right) = loop {
		if left_moves + right_moves >= max_depth {
			trace!(max_depth, "no witness within depth");
			return None;
		}
		if left_moves <= right_moves {
			left_rcs = expand(&left_rcs);
			left_moves += 1;
		}
		else {
			right_rcs = expand(&right_rcs);
			right_moves += 1;
		}
		trace!(
			left_moves, right_moves, left_len = left_rcs.len(), right_len = right_rcs.len(),
			"frontiers expanded"
		);

		if let Some(middle) = left_rcs.intersection_with(&right_rcs) {
			break middle
		}
	};

	// left.path: start -> middle, right.path: goal -> middle
	Some([left.path, invert_moves(&right.path)].concat())
}

fn expand(rcs: &SortedVec<Node>) -> SortedVec<Node> {
	let rcs_new: Vec<Node> = rcs.items
		.par_iter()
		.flat_map_iter(|rc| rc.juxt())
		.collect();
	SortedVec::from_vec(rcs_new)
}



#[derive(Debug, Clone)]
struct SortedVec<T: Clone + PartialOrd + Ord> {
	items: Vec<T>,
}
impl<T: Clone + PartialOrd + Ord> SortedVec<T> {
	fn from_vec(mut items: Vec<T>) -> Self {
		items.sort();
		items.dedup();
		Self { items }
	}

	fn from_array<const N: usize>(items: [T; N]) -> Self {
		Self::from_vec(items.to_vec())
	}

	fn len(&self) -> usize {
		self.items.len()
	}

	/// First pair of equal items, taken from `self` and `other` respectively.
	fn intersection_with(&self, other: &Self) -> Option<(T, T)> {
		let mut index_l = 0;
		let mut index_r = 0;
		while index_l < self.len() && index_r < other.len() {
			match self.items[index_l].cmp(&other.items[index_r]) {
				Ordering::Equal => {
					return Some((self.items[index_l].clone(), other.items[index_r].clone()))
				}
				Ordering::Less    => { index_l += 1; }
				Ordering::Greater => { index_r += 1; }
			}
		}
		None
	}
}
