//! Symbols and knobs shared by every component.

use thiserror::Error;

use crate::facelet::{Color, ALL_COLORS};



#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
	#[error("Expected 6 color symbols but got {0}")]
	WrongColorCount(usize),
	#[error("Color symbol {0:?} is used more than once")]
	DuplicateColor(char),
	#[error("Unknown marker {0:?} collides with a color symbol")]
	MarkerCollision(char),
}

/// Color symbols listed in home-face order (U, R, F, D, L, B), plus the
/// marker standing for a sticker that has not been observed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
	colors: [char; 6],
	unknown: char,
}
impl Alphabet {
	pub const DEFAULT: Self = Self {
		colors: ['W', 'R', 'G', 'Y', 'O', 'B'],
		unknown: '_',
	};

	pub fn new(colors: &str, unknown: char) -> Result<Self, AlphabetError> {
		let symbols: Vec<char> = colors.chars().collect();
		let colors: [char; 6] = symbols
			.as_slice()
			.try_into()
			.map_err(|_| AlphabetError::WrongColorCount(symbols.len()))?;
		for (i, symbol) in colors.iter().enumerate() {
			if colors[..i].contains(symbol) {
				return Err(AlphabetError::DuplicateColor(*symbol));
			}
		}
		if colors.contains(&unknown) {
			return Err(AlphabetError::MarkerCollision(unknown));
		}
		Ok(Self { colors, unknown })
	}

	pub fn symbol(&self, color: Color) -> char {
		self.colors[color.to_u8() as usize]
	}

	pub fn color_of(&self, symbol: char) -> Option<Color> {
		self.colors
			.iter()
			.position(|&c| c == symbol)
			.map(|i| ALL_COLORS[i])
	}

	pub fn unknown(&self) -> char {
		self.unknown
	}
}
impl Default for Alphabet {
	fn default() -> Self {
		Self::DEFAULT
	}
}



#[derive(Debug, Clone)]
pub struct Settings {
	pub alphabet: Alphabet,
	/// Completion search stops once this many completions were accepted.
	pub result_cap: usize,
	/// Candidates handed to the oracle per parallel round.
	pub batch_size: usize,
	/// Solutions up to this many face turns are searched for optimally
	/// before falling back to the two-phase solver.
	pub witness_depth: u32,
	pub scramble_length: u32,
}
impl Default for Settings {
	fn default() -> Self {
		Self {
			alphabet: Alphabet::DEFAULT,
			result_cap: 200,
			batch_size: 64,
			witness_depth: 8,
			scramble_length: 25,
		}
	}
}
