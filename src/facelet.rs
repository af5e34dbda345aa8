//! 54-sticker layout of the cube.
//!
//! Position `i` belongs to face `i / 9` (faces ordered U, R, F, D, L, B) and is
//! sticker `i % 9` of that face, read row by row as seen looking at the face:
//!
//! ```text
//!              0  1  2
//!              3  4  5
//!              6  7  8
//!  36 37 38   18 19 20    9 10 11   45 46 47
//!  39 40 41   21 22 23   12 13 14   48 49 50
//!  42 43 44   24 25 26   15 16 17   51 52 53
//!             27 28 29
//!             30 31 32
//!             33 34 35
//! ```

use thiserror::Error;

use crate::config::Alphabet;



pub const FACELETS_N: usize = 54;
pub const FACE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Face { U, R, F, D, L, B }
pub const ALL_FACES: [Face; 6] = {use Face::*; [U, R, F, D, L, B]};
impl Face {
	pub fn letter(self) -> char {
		match self {
			Face::U => 'U',
			Face::R => 'R',
			Face::F => 'F',
			Face::D => 'D',
			Face::L => 'L',
			Face::B => 'B',
		}
	}

	pub fn center(self) -> usize {
		self as usize * FACE_SIZE + 4
	}
}

/// One of the six sticker colors, numbered by the face it shows on a solved cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(u8);
pub const ALL_COLORS: [Color; 6] = [Color(0), Color(1), Color(2), Color(3), Color(4), Color(5)];
impl Color {
	pub fn to_u8(self) -> u8 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facelet {
	Known(Color),
	Unknown,
	/// A symbol that is neither a color nor the unknown marker.
	Stray(char),
}
impl Facelet {
	pub fn color(self) -> Option<Color> {
		match self {
			Facelet::Known(color) => Some(color),
			_ => None,
		}
	}
}



#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
	#[error("State must be 54 characters")]
	WrongLength { actual: usize },
}

pub fn validate_length(text: &str) -> bool {
	text.chars().count() == FACELETS_N
}



#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceletState {
	pieces: [Facelet; FACELETS_N],
}
impl FaceletState {
	/// Every face shows its home color.
	pub fn solved() -> Self {
		let mut pieces = [Facelet::Unknown; FACELETS_N];
		for (i, piece) in pieces.iter_mut().enumerate() {
			*piece = Facelet::Known(ALL_COLORS[i / FACE_SIZE]);
		}
		Self { pieces }
	}

	/// Only the length is checked here: symbols outside the alphabet are kept
	/// as [`Facelet::Stray`] and rejected by whoever needs real colors.
	pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self, FormatError> {
		if !validate_length(text) {
			return Err(FormatError::WrongLength { actual: text.chars().count() });
		}
		let mut pieces = [Facelet::Unknown; FACELETS_N];
		for (piece, symbol) in pieces.iter_mut().zip(text.chars()) {
			*piece = match alphabet.color_of(symbol) {
				Some(color) => Facelet::Known(color),
				None if symbol == alphabet.unknown() => Facelet::Unknown,
				None => Facelet::Stray(symbol),
			};
		}
		Ok(Self { pieces })
	}

	pub fn render(&self, alphabet: &Alphabet) -> String {
		self.pieces.iter().map(|&piece| symbol_of(piece, alphabet)).collect()
	}

	pub fn pieces(&self) -> &[Facelet; FACELETS_N] {
		&self.pieces
	}

	pub(crate) fn pieces_mut(&mut self) -> &mut [Facelet; FACELETS_N] {
		&mut self.pieces
	}

	pub fn face(&self, face: Face) -> &[Facelet] {
		let begin = face as usize * FACE_SIZE;
		&self.pieces[begin..begin + FACE_SIZE]
	}

	/// True when the nine symbols of every face are equal, whichever symbol
	/// that is. Whole-cube orientation and color scheme are ignored.
	pub fn is_solved_any_orientation(&self) -> bool {
		self.pieces.chunks(FACE_SIZE).all(|face| face.iter().all(|&piece| piece == face[0]))
	}

	pub fn unknown_positions(&self) -> Vec<usize> {
		self.pieces
			.iter()
			.enumerate()
			.filter(|(_, piece)| **piece == Facelet::Unknown)
			.map(|(i, _)| i)
			.collect()
	}

	pub fn has_unknowns(&self) -> bool {
		self.pieces.contains(&Facelet::Unknown)
	}

	/// Copy of `self` with `colors[j]` written into `positions[j]`.
	pub fn with_colors_at(&self, positions: &[usize], colors: &[Color]) -> Self {
		debug_assert_eq!(positions.len(), colors.len());
		let mut candidate = self.clone();
		for (&position, &color) in positions.iter().zip(colors) {
			candidate.pieces[position] = Facelet::Known(color);
		}
		candidate
	}

	/// Unfolded net, U on top, L F R B across the middle, D at the bottom.
	pub fn to_net(&self, alphabet: &Alphabet) -> String {
		let row = |face: Face, r: usize| -> String {
			self.face(face)[3*r..3*r+3]
				.iter()
				.map(|&piece| symbol_of(piece, alphabet).to_string())
				.collect::<Vec<_>>()
				.join(" ")
		};
		let mut net = String::new();
		for r in 0..3 {
			net += &format!("      {}\n", row(Face::U, r));
		}
		for r in 0..3 {
			net += &format!(
				"{} {} {} {}\n",
				row(Face::L, r), row(Face::F, r), row(Face::R, r), row(Face::B, r)
			);
		}
		for r in 0..3 {
			net += &format!("      {}\n", row(Face::D, r));
		}
		net
	}
}

fn symbol_of(piece: Facelet, alphabet: &Alphabet) -> char {
	match piece {
		Facelet::Known(color) => alphabet.symbol(color),
		Facelet::Unknown => alphabet.unknown(),
		Facelet::Stray(symbol) => symbol,
	}
}
