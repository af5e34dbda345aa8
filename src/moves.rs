//! Face turns and the rotation engine.

use std::{fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;

use crate::facelet::{Face, FaceletState, FACELETS_N};



#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Move { U, Us, U2, R, Rs, R2, F, Fs, F2, D, Ds, D2, L, Ls, L2, B, Bs, B2 }
pub const ALL_MOVES: [Move; 18] = {use Move::*; [U, Us, U2, R, Rs, R2, F, Fs, F2, D, Ds, D2, L, Ls, L2, B, Bs, B2]};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn { Clockwise, CounterClockwise, Double }

impl Move {
	pub fn face(self) -> Face {
		use Move::*;
		match self {
			U | Us | U2 => Face::U,
			R | Rs | R2 => Face::R,
			F | Fs | F2 => Face::F,
			D | Ds | D2 => Face::D,
			L | Ls | L2 => Face::L,
			B | Bs | B2 => Face::B,
		}
	}

	pub fn turn(self) -> Turn {
		match self as u8 % 3 {
			0 => Turn::Clockwise,
			1 => Turn::CounterClockwise,
			_ => Turn::Double,
		}
	}

	pub fn inverse(self) -> Self {
		let base = (self as u8 / 3 * 3) as usize;
		match self.turn() {
			Turn::Clockwise => ALL_MOVES[base + 1],
			Turn::CounterClockwise => ALL_MOVES[base],
			Turn::Double => self,
		}
	}
}
impl fmt::Display for Move {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let suffix = match self.turn() {
			Turn::Clockwise => "",
			Turn::CounterClockwise => "'",
			Turn::Double => "2",
		};
		write!(f, "{}{suffix}", self.face().letter())
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid move")]
pub struct MoveParseError {
	pub token: String,
}

impl FromStr for Move {
	type Err = MoveParseError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ALL_MOVES
			.into_iter()
			.find(|move_| move_.to_string() == s)
			.ok_or_else(|| MoveParseError { token: s.to_string() })
	}
}

/// Whitespace separated notation, e.g. `R U R' U'`.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, MoveParseError> {
	let moves = text
		.split_whitespace()
		.map(Move::from_str)
		.collect::<Result<Vec<_>, _>>()?;
	if moves.is_empty() {
		return Err(MoveParseError { token: text.to_string() });
	}
	Ok(moves)
}

pub fn format_moves(moves: &[Move]) -> String {
	moves.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
	moves.iter().rev().map(|move_| move_.inverse()).collect()
}



/// Sticker cycles of a clockwise quarter turn of each face (indexed by
/// [`Face`]). Each cycle `[a, b, c, d]` moves the sticker at `a` to `b`, `b`
/// to `c`, `c` to `d` and `d` back to `a`.
const QUARTER_TURNS: [[[usize; 4]; 5]; 6] = [
	// U
	[[0, 2, 8, 6], [1, 5, 7, 3], [18, 36, 45, 9], [19, 37, 46, 10], [20, 38, 47, 11]],
	// R
	[[9, 11, 17, 15], [10, 14, 16, 12], [20, 2, 51, 29], [26, 8, 45, 35], [23, 5, 48, 32]],
	// F
	[[18, 20, 26, 24], [19, 23, 25, 21], [6, 9, 29, 44], [7, 12, 28, 41], [8, 15, 27, 38]],
	// D
	[[27, 29, 35, 33], [28, 32, 34, 30], [24, 15, 51, 42], [25, 16, 52, 43], [26, 17, 53, 44]],
	// L
	[[36, 38, 44, 42], [37, 41, 43, 39], [0, 18, 27, 53], [6, 24, 33, 47], [3, 21, 30, 50]],
	// B
	[[45, 47, 53, 51], [46, 50, 52, 48], [2, 36, 33, 17], [0, 42, 35, 11], [1, 39, 34, 14]],
];

/// Applies `move_` to any 54-slot sticker array.
pub fn turn<T: Copy>(pieces: &mut [T; FACELETS_N], move_: Move) {
	let cycles = &QUARTER_TURNS[move_.face() as usize];
	match move_.turn() {
		Turn::Clockwise => {
			for &[a, b, c, d] in cycles {
				pieces.rotate4(a, b, c, d);
			}
		}
		Turn::CounterClockwise => {
			for &[a, b, c, d] in cycles {
				pieces.rotate4(a, d, c, b);
			}
		}
		Turn::Double => {
			for &[a, b, c, d] in cycles {
				pieces.swap(a, c);
				pieces.swap(b, d);
			}
		}
	}
}

pub trait ExtArrayRotate4 {
	fn rotate4(&mut self, i1: usize, i2: usize, i3: usize, i4: usize);
}
impl<T: Copy, const L: usize> ExtArrayRotate4 for [T; L] {
	fn rotate4(&mut self, i1: usize, i2: usize, i3: usize, i4: usize) {
		let temp = self[i4];
		self[i4] = self[i3];
		self[i3] = self[i2];
		self[i2] = self[i1];
		self[i1] = temp;
	}
}



impl FaceletState {
	pub fn new_shuffled<R: Rng>(n: u32, rng: &mut R) -> (Self, Vec<Move>) {
		let mut self_ = Self::solved();
		let moves = self_.shuffle(n, rng);
		(self_, moves)
	}

	pub fn shuffle<R: Rng>(&mut self, n: u32, rng: &mut R) -> Vec<Move> {
		let mut moves = vec![];
		for _ in 0..n {
			let move_ = self.shuffle_once(rng);
			moves.push(move_);
		}
		moves
	}

	fn shuffle_once<R: Rng>(&mut self, rng: &mut R) -> Move {
		let move_ = ALL_MOVES[rng.random_range(0..ALL_MOVES.len())];
		self.make_move(move_);
		move_
	}

	pub fn make_moves(&mut self, moves: &[Move]) {
		for &move_ in moves {
			self.make_move(move_);
		}
	}

	pub fn make_move(&mut self, move_: Move) {
		turn(self.pieces_mut(), move_);
	}
}



#[cfg(test)]
mod rubiks_cube {
	use super::*;
	use crate::config::Alphabet;
	use rand::{rngs::StdRng, SeedableRng};

	fn parse(text: &str) -> FaceletState {
		FaceletState::parse(text, &Alphabet::default()).unwrap()
	}

	mod notation {
		use super::*;

		#[test]
		fn round_trip_all() {
			for move_ in ALL_MOVES {
				assert_eq!(Ok(move_), move_.to_string().parse());
			}
			assert_eq!("U U' U2", format_moves(&[Move::U, Move::Us, Move::U2]));
		}

		#[test]
		fn sequence() {
			use Move::*;
			assert_eq!(Ok(vec![R, U, Rs, Us]), parse_moves("R U R' U'"));
			assert_eq!(vec![U, R, Us, Rs], invert_moves(&[R, U, Rs, Us]));
		}

		#[test]
		fn rejects() {
			for text in ["", "  ", "X", "U3", "u", "R U M"] {
				assert!(parse_moves(text).is_err(), "{text:?}");
			}
			assert_eq!("Invalid move", "Q".parse::<Move>().unwrap_err().to_string());
		}

		#[test]
		fn inverse() {
			for move_ in ALL_MOVES {
				assert_eq!(move_.face(), move_.inverse().face());
				assert_eq!(move_, move_.inverse().inverse());
			}
			assert_eq!(Move::Ls, Move::L.inverse());
			assert_eq!(Move::B2, Move::B2.inverse());
		}
	}

	mod moves {
		use super::*;

		#[test]
		fn top_solved() {
			let mut rc = FaceletState::solved();
			rc.make_move(Move::U);
			assert_eq!(
				parse("WWWWWWWWWBBBRRRRRRRRRGGGGGGYYYYYYYYYGGGOOOOOOOOOBBBBBB"),
				rc
			)
		}

		#[test]
		fn front_solved() {
			let mut rc = FaceletState::solved();
			rc.make_move(Move::F);
			assert_eq!(
				parse("WWWWWWOOOWRRWRRWRRGGGGGGGGGRRRYYYYYYOOYOOYOOYBBBBBBBBB"),
				rc
			)
		}

		#[test]
		fn four_quarter_turns_are_identity() {
			for move_ in ALL_MOVES {
				let mut rc = FaceletState::solved();
				rc.shuffle(7, &mut StdRng::seed_from_u64(move_ as u64));
				let before = rc.clone();
				rc.make_moves(&[move_; 4]);
				assert_eq!(before, rc, "{move_}");
			}
		}

		#[test]
		fn turn_then_inverse() {
			for move_ in ALL_MOVES {
				let mut rc = FaceletState::solved();
				rc.make_move(move_);
				assert_ne!(FaceletState::solved(), rc);
				rc.make_move(move_.inverse());
				assert_eq!(FaceletState::solved(), rc);
			}
		}

		#[test]
		fn double_is_two_quarters() {
			for face in [Move::U, Move::R, Move::F, Move::D, Move::L, Move::B] {
				let mut twice = FaceletState::solved();
				twice.make_moves(&[face, face]);
				let mut double = FaceletState::solved();
				double.make_move(ALL_MOVES[face as usize + 2]);
				assert_eq!(twice, double);
			}
		}

		#[test]
		fn sexy_move_has_order_6() {
			let sexy = parse_moves("R U R' U'").unwrap();
			let mut rc = FaceletState::solved();
			for i in 1..=6 {
				rc.make_moves(&sexy);
				assert_eq!(i == 6, rc == FaceletState::solved());
			}
		}

		#[test]
		fn centers_never_move() {
			let (rc, _) = FaceletState::new_shuffled(40, &mut StdRng::seed_from_u64(7));
			for face in crate::facelet::ALL_FACES {
				assert_eq!(FaceletState::solved().pieces()[face.center()], rc.pieces()[face.center()]);
			}
		}
	}

	mod shuffle {
		use super::*;

		#[test]
		fn undo_scramble() {
			let (mut rc, moves) = FaceletState::new_shuffled(25, &mut StdRng::seed_from_u64(42));
			assert_eq!(25, moves.len());
			rc.make_moves(&invert_moves(&moves));
			assert_eq!(FaceletState::solved(), rc);
		}

		#[test]
		fn seeded_is_reproducible() {
			let a = FaceletState::new_shuffled(25, &mut StdRng::seed_from_u64(3));
			let b = FaceletState::new_shuffled(25, &mut StdRng::seed_from_u64(3));
			assert_eq!(a, b);
		}
	}

	#[test]
	fn unknown_stickers_travel() {
		let mut rc = parse("WWWWWWWW_RRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB");
		rc.make_move(Move::R);
		assert_eq!(vec![45], rc.unknown_positions());
	}
}

#[test]
fn rotate4() {
	//              0    1    2    3    4    5    6    7
	let mut arr = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
	arr.rotate4(1, 4, 5, 6);
	assert_eq!(
		['a', 'g', 'c', 'd', 'b', 'e', 'f', 'h'],
		arr
	);
}
