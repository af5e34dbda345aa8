//! Solvability oracle.
//!
//! The completion search only ever sees [`SolvabilityOracle`]. [`CubieOracle`]
//! is the in-crate implementation: it reads the sticker colors as corner and
//! edge pieces and checks the invariants every reachable cube satisfies, which
//! is exact. Solving sequences come from a short optimal search when the state
//! is close to solved, and from the two-phase solver otherwise.

use thiserror::Error;

use crate::{
	config::Alphabet,
	cubie::CubieCube,
	facelet::{Facelet, FaceletState, ALL_COLORS, ALL_FACES, FACELETS_N, FACE_SIZE},
	moves::Move,
	two_phase, witness,
};



#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
	/// Turns that bring the state back to solved.
	pub moves: Vec<Move>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
	#[error("State contains unknown or unrecognised stickers")]
	Incomplete,
	#[error("Color {symbol} appears {count} times, expected 9")]
	ColorCount { symbol: char, count: usize },
	#[error("Center stickers must all have different colors")]
	DuplicateCenters,
	#[error("Corner {0} has an impossible color combination")]
	InvalidCorner(&'static str),
	#[error("Edge {0} has an impossible color combination")]
	InvalidEdge(&'static str),
	#[error("Corner {0} appears more than once")]
	DuplicateCorner(&'static str),
	#[error("Edge {0} appears more than once")]
	DuplicateEdge(&'static str),
	#[error("Some corner is twisted")]
	TwistedCorner,
	#[error("Some edge is flipped")]
	FlippedEdge,
	#[error("Two pieces are swapped")]
	Parity,
	#[error("No solution found")]
	NotFound,
}

pub trait SolvabilityOracle: Sync {
	/// Succeeds iff `state` can be turned back into a solved cube.
	fn solve(&self, state: &FaceletState) -> Result<Solution, Rejection>;

	/// Same verdict as [`Self::solve`], for callers that only need the verdict.
	fn verify(&self, state: &FaceletState) -> Result<(), Rejection> {
		self.solve(state).map(|_| ())
	}
}



#[derive(Debug, Clone)]
pub struct CubieOracle {
	alphabet: Alphabet,
	witness_depth: u32,
}
impl CubieOracle {
	pub fn new(alphabet: Alphabet, witness_depth: u32) -> Self {
		Self { alphabet, witness_depth }
	}

	/// Relabels every sticker by the face whose center has its color.
	fn to_faces(&self, state: &FaceletState) -> Result<[u8; FACELETS_N], Rejection> {
		let mut counts = [0usize; 6];
		for piece in state.pieces() {
			match piece {
				Facelet::Known(color) => counts[color.to_u8() as usize] += 1,
				Facelet::Unknown | Facelet::Stray(_) => return Err(Rejection::Incomplete),
			}
		}
		for color in ALL_COLORS {
			let count = counts[color.to_u8() as usize];
			if count != FACE_SIZE {
				return Err(Rejection::ColorCount { symbol: self.alphabet.symbol(color), count });
			}
		}

		// color -> face, 6 means "not a center color"
		let mut face_of = [6u8; 6];
		for face in ALL_FACES {
			let color = state.pieces()[face.center()].color().ok_or(Rejection::Incomplete)?;
			if face_of[color.to_u8() as usize] != 6 {
				return Err(Rejection::DuplicateCenters);
			}
			face_of[color.to_u8() as usize] = face as u8;
		}

		let mut faces = [0u8; FACELETS_N];
		for (face, piece) in faces.iter_mut().zip(state.pieces()) {
			if let Facelet::Known(color) = piece {
				*face = face_of[color.to_u8() as usize];
			}
		}
		Ok(faces)
	}
}
impl SolvabilityOracle for CubieOracle {
	fn solve(&self, state: &FaceletState) -> Result<Solution, Rejection> {
		let faces = self.to_faces(state)?;
		let cube = CubieCube::from_faces(&faces)?;
		cube.verify()?;
		let moves = witness::search(faces, self.witness_depth)
			.or_else(|| two_phase::solve(&cube))
			.ok_or(Rejection::NotFound)?;
		Ok(Solution { moves })
	}

	fn verify(&self, state: &FaceletState) -> Result<(), Rejection> {
		let faces = self.to_faces(state)?;
		CubieCube::from_faces(&faces)?.verify()
	}
}



#[cfg(test)]
mod cubie_oracle {
	use super::*;
	use crate::moves::parse_moves;
	use rand::{rngs::StdRng, SeedableRng};

	const SOLVED: &str = "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB";

	fn oracle() -> CubieOracle {
		CubieOracle::new(Alphabet::default(), 6)
	}

	fn state(text: &str) -> FaceletState {
		FaceletState::parse(text, &Alphabet::default()).unwrap()
	}

	fn swapped(text: &str, a: usize, b: usize) -> String {
		let mut chars: Vec<char> = text.chars().collect();
		chars.swap(a, b);
		chars.into_iter().collect()
	}

	#[test]
	fn solved() {
		assert_eq!(Ok(Solution { moves: vec![] }), oracle().solve(&state(SOLVED)));
	}

	#[test]
	fn scrambles_are_solvable() {
		for seed in 0..20 {
			let (rc, _) = FaceletState::new_shuffled(30, &mut StdRng::seed_from_u64(seed));
			assert_eq!(Ok(()), oracle().verify(&rc), "seed {seed}");
		}
	}

	#[test]
	fn short_scramble_is_solved_optimally() {
		let scramble = parse_moves("R U F' D2 L").unwrap();
		let mut rc = FaceletState::solved();
		rc.make_moves(&scramble);
		let solution = oracle().solve(&rc).unwrap();
		assert!(solution.moves.len() <= scramble.len());
		rc.make_moves(&solution.moves);
		assert_eq!(FaceletState::solved(), rc);
	}

	#[test]
	fn long_scrambles_are_solved() {
		for seed in 0..3 {
			let (mut rc, _) = FaceletState::new_shuffled(25, &mut StdRng::seed_from_u64(seed));
			let solution = oracle().solve(&rc).unwrap();
			assert!(!solution.moves.is_empty(), "seed {seed}");
			rc.make_moves(&solution.moves);
			assert_eq!(FaceletState::solved(), rc, "seed {seed}");
		}
	}

	#[test]
	fn other_color_scheme_is_solved_to_its_centers() {
		let text = "BBBBBBBBBOOOOOOOOOYYYYYYYYYGGGGGGGGGRRRRRRRRRWWWWWWWWW";
		let mut rc = state(text);
		rc.make_moves(&parse_moves("F R' D B2 L U' R F2 D'").unwrap());
		let solution = oracle().solve(&rc).unwrap();
		rc.make_moves(&solution.moves);
		assert_eq!(state(text), rc);
	}

	#[test]
	fn other_color_scheme() {
		let text = "BBBBBBBBBOOOOOOOOOYYYYYYYYYGGGGGGGGGRRRRRRRRRWWWWWWWWW";
		let mut rc = state(text);
		rc.make_moves(&parse_moves("F R' D").unwrap());
		assert_eq!(Ok(()), oracle().verify(&rc));
	}

	mod rejects {
		use super::*;

		#[test]
		fn incomplete() {
			let text = format!("_{}", &SOLVED[1..]);
			assert_eq!(Err(Rejection::Incomplete), oracle().verify(&state(&text)));
			let text = format!("X{}", &SOLVED[1..]);
			assert_eq!(Err(Rejection::Incomplete), oracle().verify(&state(&text)));
		}

		#[test]
		fn color_count() {
			let text = format!("R{}", &SOLVED[1..]);
			assert_eq!(
				Err(Rejection::ColorCount { symbol: 'W', count: 8 }),
				oracle().verify(&state(&text))
			);
		}

		#[test]
		fn duplicate_centers() {
			// swap the U center with a R corner sticker: counts stay at 9
			let text = swapped(SOLVED, 4, 9);
			assert_eq!(Err(Rejection::DuplicateCenters), oracle().verify(&state(&text)));
		}

		#[test]
		fn twisted_corner() {
			// URF turned in place
			let mut chars: Vec<char> = SOLVED.chars().collect();
			chars[8] = 'G';
			chars[9] = 'W';
			chars[20] = 'R';
			let text: String = chars.into_iter().collect();
			assert_eq!(Err(Rejection::TwistedCorner), oracle().verify(&state(&text)));
		}

		#[test]
		fn flipped_edge() {
			// UF edge
			let text = swapped(SOLVED, 7, 19);
			assert_eq!(Err(Rejection::FlippedEdge), oracle().verify(&state(&text)));
		}

		#[test]
		fn swapped_edges() {
			// UR <-> UF, both keep their orientation
			let text = swapped(SOLVED, 10, 19);
			assert_eq!(Err(Rejection::Parity), oracle().verify(&state(&text)));
		}

		#[test]
		fn impossible_corner() {
			// URF shows U, B, F
			let text = swapped(SOLVED, 9, 45);
			assert_eq!(Err(Rejection::InvalidCorner("URF")), oracle().verify(&state(&text)));
		}

		#[test]
		fn impossible_edge() {
			// UR shows U, U
			let mut chars: Vec<char> = SOLVED.chars().collect();
			chars[10] = 'W';
			chars[1] = 'R';
			let text: String = chars.into_iter().collect();
			assert!(matches!(oracle().verify(&state(&text)), Err(Rejection::InvalidEdge(_))));
		}
	}
}
