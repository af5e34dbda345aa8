//! Piece-level view: which corner and edge sits in each slot and how it is turned.
//!
//! Slots and pieces share one numbering: corners URF UFL ULB UBR DFR DLF DBL DRB,
//! edges UR UF UL UB DR DF DL DB FR FL BL BR.

use crate::{
	facelet::FACELETS_N,
	moves::{Move, Turn},
	oracle::Rejection,
};



pub const CORNER_NAMES: [&str; 8] = ["URF", "UFL", "ULB", "UBR", "DFR", "DLF", "DBL", "DRB"];
pub const EDGE_NAMES: [&str; 12] = ["UR", "UF", "UL", "UB", "DR", "DF", "DL", "DB", "FR", "FL", "BL", "BR"];

/// Sticker positions of each corner slot, starting with its U or D sticker
/// and going clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
	[8, 9, 20], [6, 18, 38], [0, 36, 47], [2, 45, 11],
	[29, 26, 15], [27, 44, 24], [33, 53, 42], [35, 17, 51],
];
/// Home faces of each corner piece, in the same order as [`CORNER_FACELETS`].
const CORNER_FACES: [[u8; 3]; 8] = [
	[0, 1, 2], [0, 2, 4], [0, 4, 5], [0, 5, 1],
	[3, 2, 1], [3, 4, 2], [3, 5, 4], [3, 1, 5],
];
const EDGE_FACELETS: [[usize; 2]; 12] = [
	[5, 10], [7, 19], [3, 37], [1, 46], [32, 16], [28, 25],
	[30, 43], [34, 52], [23, 12], [21, 41], [50, 39], [48, 14],
];
const EDGE_FACES: [[u8; 2]; 12] = [
	[0, 1], [0, 2], [0, 4], [0, 5], [3, 1], [3, 2],
	[3, 4], [3, 5], [2, 1], [2, 4], [5, 4], [5, 1],
];
const U_FACE: u8 = 0;
const D_FACE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubieCube {
	/// `cp[slot]` is the corner piece sitting in `slot`.
	pub cp: [u8; 8],
	pub co: [u8; 8],
	pub ep: [u8; 12],
	pub eo: [u8; 12],
}

/// Clockwise quarter turn of each face, indexed by [`crate::facelet::Face`].
const QUARTER_TURNS: [CubieCube; 6] = [
	// U
	CubieCube {
		cp: [3, 0, 1, 2, 4, 5, 6, 7], co: [0, 0, 0, 0, 0, 0, 0, 0],
		ep: [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11], eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
	},
	// R
	CubieCube {
		cp: [4, 1, 2, 0, 7, 5, 6, 3], co: [2, 0, 0, 1, 1, 0, 0, 2],
		ep: [8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0], eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
	},
	// F
	CubieCube {
		cp: [1, 5, 2, 3, 0, 4, 6, 7], co: [1, 2, 0, 0, 2, 1, 0, 0],
		ep: [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11], eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
	},
	// D
	CubieCube {
		cp: [0, 1, 2, 3, 5, 6, 7, 4], co: [0, 0, 0, 0, 0, 0, 0, 0],
		ep: [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11], eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
	},
	// L
	CubieCube {
		cp: [0, 2, 6, 3, 4, 1, 5, 7], co: [0, 1, 2, 0, 0, 2, 1, 0],
		ep: [0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11], eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
	},
	// B
	CubieCube {
		cp: [0, 1, 3, 7, 4, 5, 2, 6], co: [0, 0, 1, 2, 0, 0, 2, 1],
		ep: [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7], eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
	},
];

impl CubieCube {
	pub const SOLVED: Self = Self {
		cp: [0, 1, 2, 3, 4, 5, 6, 7],
		co: [0; 8],
		ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
		eo: [0; 12],
	};

	/// `faces[i]` is the face whose center shares the color of sticker `i`.
	pub fn from_faces(faces: &[u8; FACELETS_N]) -> Result<Self, Rejection> {
		let mut self_ = Self::SOLVED;

		for (slot, facelets) in CORNER_FACELETS.iter().enumerate() {
			let ori = (0..3)
				.find(|&ori| matches!(faces[facelets[ori]], U_FACE | D_FACE))
				.ok_or(Rejection::InvalidCorner(CORNER_NAMES[slot]))?;
			let col1 = faces[facelets[(ori + 1) % 3]];
			let col2 = faces[facelets[(ori + 2) % 3]];
			let piece = CORNER_FACES
				.iter()
				.position(|home| home[1] == col1 && home[2] == col2 && home[0] == faces[facelets[ori]])
				.ok_or(Rejection::InvalidCorner(CORNER_NAMES[slot]))?;
			self_.cp[slot] = piece as u8;
			self_.co[slot] = ori as u8;
		}

		for (slot, [a, b]) in EDGE_FACELETS.iter().enumerate() {
			let (fa, fb) = (faces[*a], faces[*b]);
			let (piece, ori) = EDGE_FACES
				.iter()
				.enumerate()
				.find_map(|(piece, home)| {
					if *home == [fa, fb] {
						Some((piece, 0))
					}
					else if *home == [fb, fa] {
						Some((piece, 1))
					}
					else {
						None
					}
				})
				.ok_or(Rejection::InvalidEdge(EDGE_NAMES[slot]))?;
			self_.ep[slot] = piece as u8;
			self_.eo[slot] = ori;
		}

		Ok(self_)
	}

	pub fn verify(&self) -> Result<(), Rejection> {
		if let Some(piece) = first_repeated(&self.cp) {
			return Err(Rejection::DuplicateCorner(CORNER_NAMES[piece as usize]));
		}
		if let Some(piece) = first_repeated(&self.ep) {
			return Err(Rejection::DuplicateEdge(EDGE_NAMES[piece as usize]));
		}
		if self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
			return Err(Rejection::TwistedCorner);
		}
		if self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
			return Err(Rejection::FlippedEdge);
		}
		if is_odd(&self.cp) != is_odd(&self.ep) {
			return Err(Rejection::Parity);
		}
		Ok(())
	}

	/// `other` performed after `self`.
	pub fn multiply(&self, other: &Self) -> Self {
		let mut product = Self::SOLVED;
		for slot in 0..8 {
			let from = other.cp[slot] as usize;
			product.cp[slot] = self.cp[from];
			product.co[slot] = (self.co[from] + other.co[slot]) % 3;
		}
		for slot in 0..12 {
			let from = other.ep[slot] as usize;
			product.ep[slot] = self.ep[from];
			product.eo[slot] = (self.eo[from] + other.eo[slot]) % 2;
		}
		product
	}

	pub fn make_move(&self, move_: Move) -> Self {
		let quarter = &QUARTER_TURNS[move_.face() as usize];
		let quarters = match move_.turn() {
			Turn::Clockwise => 1,
			Turn::Double => 2,
			Turn::CounterClockwise => 3,
		};
		(0..quarters).fold(self.clone(), |cube, _| cube.multiply(quarter))
	}
}

fn first_repeated(perm: &[u8]) -> Option<u8> {
	perm.iter()
		.enumerate()
		.find(|&(i, piece)| perm[..i].contains(piece))
		.map(|(_, &piece)| piece)
}

fn is_odd(perm: &[u8]) -> bool {
	let mut inversions = 0;
	for i in 0..perm.len() {
		for j in i+1..perm.len() {
			if perm[i] > perm[j] {
				inversions += 1;
			}
		}
	}
	inversions % 2 == 1
}



#[cfg(test)]
mod cubie_cube {
	use super::*;
	use crate::moves::{parse_moves, turn, ALL_MOVES};
	use rand::{rngs::StdRng, SeedableRng};

	fn solved_faces() -> [u8; FACELETS_N] {
		let mut faces = [0u8; FACELETS_N];
		for (i, face) in faces.iter_mut().enumerate() {
			*face = (i / 9) as u8;
		}
		faces
	}

	fn turned_faces(moves: &[Move]) -> [u8; FACELETS_N] {
		let mut faces = solved_faces();
		for &move_ in moves {
			turn(&mut faces, move_);
		}
		faces
	}

	#[test]
	fn solved() {
		assert_eq!(Ok(CubieCube::SOLVED), CubieCube::from_faces(&solved_faces()));
	}

	#[test]
	fn moves_agree_with_stickers() {
		for move_ in ALL_MOVES {
			assert_eq!(
				Ok(CubieCube::SOLVED.make_move(move_)),
				CubieCube::from_faces(&turned_faces(&[move_])),
				"{move_}"
			);
		}
	}

	#[test]
	fn sequences_agree_with_stickers() {
		let mut rng = StdRng::seed_from_u64(5);
		let (_, moves) = crate::facelet::FaceletState::new_shuffled(30, &mut rng);
		let cube = moves.iter().fold(CubieCube::SOLVED, |cube, &move_| cube.make_move(move_));
		assert_eq!(Ok(cube.clone()), CubieCube::from_faces(&turned_faces(&moves)));
		assert_eq!(Ok(()), cube.verify());
	}

	#[test]
	fn multiply_is_sequencing() {
		let sexy = parse_moves("R U R' U'").unwrap();
		let step = sexy.iter().fold(CubieCube::SOLVED, |cube, &move_| cube.make_move(move_));
		let mut power = CubieCube::SOLVED;
		for i in 1..=6 {
			power = power.multiply(&step);
			assert_eq!(i == 6, power == CubieCube::SOLVED);
		}
	}
}
