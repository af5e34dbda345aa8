//! Two-phase solver for states the witness search cannot reach.
//!
//! Phase one brings the cube into the subgroup generated by U, D, R2, L2, F2
//! and B2: every piece oriented and the four middle-layer edges in the middle
//! layer. Phase two solves it using only those turns. Both phases are IDA*
//! over small coordinates, bounded by pruning tables built once on first use.

use std::sync::LazyLock;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
	cubie::CubieCube,
	moves::{Move, ALL_MOVES},
};



const N_TWIST: usize = 2187;
const N_FLIP: usize = 2048;
const N_SLICE: usize = 495;
const N_CORNERS: usize = 40320;
const N_EDGES: usize = 40320;
const N_SLICE_PERM: usize = 24;

/// Slice coordinate of a cube whose middle-layer edges are in the middle layer.
const SOLVED_SLICE: usize = 494;

const PHASE1_MAX_DEPTH: u32 = 12;
const PHASE2_MAX_DEPTH: u32 = 18;

const PHASE2_MOVES: [Move; 10] = {use Move::*; [U, Us, U2, D, Ds, D2, R2, L2, F2, B2]};

/// Solving sequence for a cube that passed [`CubieCube::verify`].
pub fn solve(cube: &CubieCube) -> Option<Vec<Move>> {
	let mut search = Search { tables: &TABLES, start: cube, path: vec![] };
	let (twist, flip, slice) = (twist(cube), flip(cube), slice(cube));
	for depth in 0..=PHASE1_MAX_DEPTH {
		if search.phase1(twist, flip, slice, depth, None) {
			debug!(phase1 = depth, total = search.path.len(), "two-phase solution found");
			return Some(search.path);
		}
	}
	None
}



struct Search<'a> {
	tables: &'a Tables,
	start: &'a CubieCube,
	path: Vec<Move>,
}
impl Search<'_> {
	fn phase1(&mut self, twist: usize, flip: usize, slice: usize, depth: u32, last: Option<Move>) -> bool {
		let t = self.tables;
		if depth == 0 {
			return twist == 0 && flip == 0 && slice == SOLVED_SLICE && self.phase2_from_here();
		}
		let bound = t.twist_slice_prune[twist * N_SLICE + slice].max(t.flip_slice_prune[flip * N_SLICE + slice]);
		if bound as u32 > depth {
			return false;
		}
		for move_ in ALL_MOVES {
			if !follows(last, move_) {
				continue;
			}
			let m = move_ as usize;
			self.path.push(move_);
			let next = (t.twist_move[twist][m] as usize, t.flip_move[flip][m] as usize, t.slice_move[slice][m] as usize);
			if self.phase1(next.0, next.1, next.2, depth - 1, Some(move_)) {
				return true;
			}
			self.path.pop();
		}
		false
	}

	fn phase2_from_here(&mut self) -> bool {
		let cube = self.path.iter().fold(self.start.clone(), |cube, &move_| cube.make_move(move_));
		let (corners, edges, slice) = (corner_perm(&cube), edge_perm(&cube), slice_perm(&cube));
		(0..=PHASE2_MAX_DEPTH).any(|depth| self.phase2(corners, edges, slice, depth, None))
	}

	fn phase2(&mut self, corners: usize, edges: usize, slice: usize, depth: u32, last: Option<Move>) -> bool {
		let t = self.tables;
		if depth == 0 {
			return corners == 0 && edges == 0 && slice == 0;
		}
		let bound = t.corner_slice_prune[corners * N_SLICE_PERM + slice]
			.max(t.edge_slice_prune[edges * N_SLICE_PERM + slice]);
		if bound as u32 > depth {
			return false;
		}
		for (k, move_) in PHASE2_MOVES.into_iter().enumerate() {
			if !follows(last, move_) {
				continue;
			}
			self.path.push(move_);
			let next = (t.corner_move[corners][k] as usize, t.edge_move[edges][k] as usize, t.slice_perm_move[slice][k] as usize);
			if self.phase2(next.0, next.1, next.2, depth - 1, Some(move_)) {
				return true;
			}
			self.path.pop();
		}
		false
	}
}

/// Skips turning the same face twice in a row, and fixes the order of
/// turns on opposite faces since those commute.
fn follows(last: Option<Move>, move_: Move) -> bool {
	let Some(last) = last else { return true };
	let (face, last_face) = (move_.face() as u8, last.face() as u8);
	if face == last_face {
		return false;
	}
	!(face % 3 == last_face % 3 && face < last_face)
}



struct Tables {
	twist_move: Vec<[u16; 18]>,
	flip_move: Vec<[u16; 18]>,
	slice_move: Vec<[u16; 18]>,
	corner_move: Vec<[u16; 10]>,
	edge_move: Vec<[u16; 10]>,
	slice_perm_move: Vec<[u16; 10]>,
	twist_slice_prune: Vec<u8>,
	flip_slice_prune: Vec<u8>,
	corner_slice_prune: Vec<u8>,
	edge_slice_prune: Vec<u8>,
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

impl Tables {
	fn build() -> Self {
		let twist_move = move_table(N_TWIST, ALL_MOVES, from_twist, twist);
		let flip_move = move_table(N_FLIP, ALL_MOVES, from_flip, flip);
		let slice_move = move_table(N_SLICE, ALL_MOVES, from_slice, slice);
		let corner_move = move_table(N_CORNERS, PHASE2_MOVES, from_corner_perm, corner_perm);
		let edge_move = move_table(N_EDGES, PHASE2_MOVES, from_edge_perm, edge_perm);
		let slice_perm_move = move_table(N_SLICE_PERM, PHASE2_MOVES, from_slice_perm, slice_perm);

		let twist_slice_prune = prune_table(N_SLICE, &twist_move, &slice_move, SOLVED_SLICE);
		let flip_slice_prune = prune_table(N_SLICE, &flip_move, &slice_move, SOLVED_SLICE);
		let corner_slice_prune = prune_table(N_SLICE_PERM, &corner_move, &slice_perm_move, 0);
		let edge_slice_prune = prune_table(N_SLICE_PERM, &edge_move, &slice_perm_move, 0);
		debug!("two-phase tables built");

		Self {
			twist_move, flip_move, slice_move,
			corner_move, edge_move, slice_perm_move,
			twist_slice_prune, flip_slice_prune, corner_slice_prune, edge_slice_prune,
		}
	}
}

fn move_table<const M: usize>(
	n: usize,
	moves: [Move; M],
	from: fn(usize) -> CubieCube,
	to: fn(&CubieCube) -> usize,
) -> Vec<[u16; M]> {
	(0..n)
		.into_par_iter()
		.map(|coord| {
			let cube = from(coord);
			moves.map(|move_| to(&cube.make_move(move_)) as u16)
		})
		.collect()
}

/// Breadth-first distances over the product of two coordinates, the first
/// one indexing `a_move` and the second `b_move`.
fn prune_table<const M: usize>(n_b: usize, a_move: &[[u16; M]], b_move: &[[u16; M]], goal_b: usize) -> Vec<u8> {
	let mut depths = vec![u8::MAX; a_move.len() * n_b];
	depths[goal_b] = 0;
	let mut frontier = vec![goal_b];
	let mut depth = 0;
	while !frontier.is_empty() {
		depth += 1;
		let mut next = vec![];
		for index in frontier {
			let (a, b) = (index / n_b, index % n_b);
			for k in 0..M {
				let child = a_move[a][k] as usize * n_b + b_move[b][k] as usize;
				if depths[child] == u8::MAX {
					depths[child] = depth;
					next.push(child);
				}
			}
		}
		frontier = next;
	}
	depths
}



fn twist(cube: &CubieCube) -> usize {
	cube.co[..7].iter().fold(0, |acc, &o| acc * 3 + o as usize)
}

fn from_twist(mut coord: usize) -> CubieCube {
	let mut cube = CubieCube::SOLVED;
	let mut sum = 0;
	for slot in (0..7).rev() {
		cube.co[slot] = (coord % 3) as u8;
		sum += cube.co[slot];
		coord /= 3;
	}
	cube.co[7] = (3 - sum % 3) % 3;
	cube
}

fn flip(cube: &CubieCube) -> usize {
	cube.eo[..11].iter().fold(0, |acc, &o| acc * 2 + o as usize)
}

fn from_flip(mut coord: usize) -> CubieCube {
	let mut cube = CubieCube::SOLVED;
	let mut sum = 0;
	for slot in (0..11).rev() {
		cube.eo[slot] = (coord % 2) as u8;
		sum += cube.eo[slot];
		coord /= 2;
	}
	cube.eo[11] = sum % 2;
	cube
}

/// Which four slots hold the middle-layer edges (FR FL BL BR), ranked in
/// colexicographic order.
fn slice(cube: &CubieCube) -> usize {
	let mut k = 0;
	let mut coord = 0;
	for (slot, &piece) in cube.ep.iter().enumerate() {
		if piece >= 8 {
			k += 1;
			coord += binomial(slot, k);
		}
	}
	coord
}

fn from_slice(mut coord: usize) -> CubieCube {
	let mut in_slice = [false; 12];
	let mut top = 12;
	for k in (1..=4).rev() {
		let mut slot = k - 1;
		while slot + 1 < top && binomial(slot + 1, k) <= coord {
			slot += 1;
		}
		coord -= binomial(slot, k);
		in_slice[slot] = true;
		top = slot;
	}

	let mut cube = CubieCube::SOLVED;
	let (mut middle, mut other) = (8, 0);
	for (slot, &is_middle) in in_slice.iter().enumerate() {
		if is_middle {
			cube.ep[slot] = middle;
			middle += 1;
		}
		else {
			cube.ep[slot] = other;
			other += 1;
		}
	}
	cube
}

fn corner_perm(cube: &CubieCube) -> usize {
	perm_rank(&cube.cp)
}

fn from_corner_perm(coord: usize) -> CubieCube {
	CubieCube { cp: perm_unrank(coord), ..CubieCube::SOLVED }
}

/// Only meaningful once the middle-layer edges are in the middle layer.
fn edge_perm(cube: &CubieCube) -> usize {
	perm_rank(&cube.ep[..8])
}

fn from_edge_perm(coord: usize) -> CubieCube {
	let mut cube = CubieCube::SOLVED;
	let perm: [u8; 8] = perm_unrank(coord);
	cube.ep[..8].copy_from_slice(&perm);
	cube
}

fn slice_perm(cube: &CubieCube) -> usize {
	let mut perm = [0u8; 4];
	for (piece, &slot) in perm.iter_mut().zip(&cube.ep[8..]) {
		*piece = slot - 8;
	}
	perm_rank(&perm)
}

fn from_slice_perm(coord: usize) -> CubieCube {
	let mut cube = CubieCube::SOLVED;
	let perm: [u8; 4] = perm_unrank(coord);
	for (slot, piece) in cube.ep[8..].iter_mut().zip(perm) {
		*slot = piece + 8;
	}
	cube
}

fn binomial(n: usize, k: usize) -> usize {
	if k > n {
		return 0;
	}
	(0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Lehmer code of a permutation of `0..perm.len()`.
fn perm_rank(perm: &[u8]) -> usize {
	let n = perm.len();
	(0..n).fold(0, |acc, i| {
		acc * (n - i) + perm[i+1..].iter().filter(|&&p| p < perm[i]).count()
	})
}

fn perm_unrank<const N: usize>(mut coord: usize) -> [u8; N] {
	let mut digits = [0usize; N];
	for i in (0..N).rev() {
		digits[i] = coord % (N - i);
		coord /= N - i;
	}
	let mut available: Vec<u8> = (0..N as u8).collect();
	digits.map(|digit| available.remove(digit))
}
