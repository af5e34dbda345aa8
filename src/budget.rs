//! How many stickers of each color a partially known state is still missing.

use thiserror::Error;

use crate::{
	config::Alphabet,
	facelet::{Color, Facelet, FaceletState, ALL_COLORS, FACE_SIZE},
};



#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
	#[error("Too many {symbol} stickers")]
	TooMany { symbol: char, count: usize },
	/// Also raised when stray symbols occupy slots no color can fill.
	#[error("Color counts incorrect")]
	CountMismatch { needed: usize, unknown: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBudget {
	needed: [usize; 6],
	unknown_positions: Vec<usize>,
}
impl ColorBudget {
	pub fn compute(state: &FaceletState, alphabet: &Alphabet) -> Result<Self, BudgetError> {
		let mut counts = [0usize; 6];
		for color in state.pieces().iter().filter_map(|piece| piece.color()) {
			counts[color.to_u8() as usize] += 1;
		}

		let mut needed = [0usize; 6];
		for color in ALL_COLORS {
			let count = counts[color.to_u8() as usize];
			needed[color.to_u8() as usize] = FACE_SIZE
				.checked_sub(count)
				.ok_or(BudgetError::TooMany { symbol: alphabet.symbol(color), count })?;
		}

		let unknown_positions = state.unknown_positions();
		let total: usize = needed.iter().sum();
		if total != unknown_positions.len() {
			return Err(BudgetError::CountMismatch { needed: total, unknown: unknown_positions.len() });
		}
		debug_assert!(state.pieces().iter().all(|piece| !matches!(piece, Facelet::Stray(_))));

		Ok(Self { needed, unknown_positions })
	}

	pub fn needed(&self, color: Color) -> usize {
		self.needed[color.to_u8() as usize]
	}

	/// Missing colors as a flat, sorted multiset, one entry per missing sticker.
	pub fn multiset(&self) -> Vec<Color> {
		ALL_COLORS
			.into_iter()
			.flat_map(|color| std::iter::repeat_n(color, self.needed(color)))
			.collect()
	}

	/// Ascending, matches [`Self::multiset`] entry for entry once permuted.
	pub fn unknown_positions(&self) -> &[usize] {
		&self.unknown_positions
	}
}



#[cfg(test)]
mod color_budget {
	use super::*;

	const SOLVED: &str = "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB";

	fn budget(text: &str) -> Result<ColorBudget, BudgetError> {
		let alphabet = Alphabet::default();
		ColorBudget::compute(&FaceletState::parse(text, &alphabet).unwrap(), &alphabet)
	}

	#[test]
	fn two_missing() {
		let text = format!("{}_{}_{}", &SOLVED[..9], &SOLVED[10..45], &SOLVED[46..]);
		let budget = budget(&text).unwrap();
		assert_eq!(&[9, 45], budget.unknown_positions());
		assert_eq!(vec![ALL_COLORS[1], ALL_COLORS[5]], budget.multiset());
		assert_eq!(1, budget.needed(ALL_COLORS[1]));
		assert_eq!(0, budget.needed(ALL_COLORS[0]));
	}

	#[test]
	fn repeated_colors_grouped() {
		let text = format!("___{}", &SOLVED[3..]);
		let budget = budget(&text).unwrap();
		assert_eq!(vec![ALL_COLORS[0]; 3], budget.multiset());
		assert_eq!(3, budget.needed(ALL_COLORS[0]));
	}

	#[test]
	fn too_many() {
		let text = format!("R_{}", &SOLVED[2..]);
		let err = budget(&text).unwrap_err();
		assert_eq!(BudgetError::TooMany { symbol: 'R', count: 10 }, err);
		assert_eq!("Too many R stickers", err.to_string());
	}

	#[test]
	fn stray_symbol_mismatch() {
		let text = format!("_X{}", &SOLVED[2..]);
		let err = budget(&text).unwrap_err();
		assert_eq!(BudgetError::CountMismatch { needed: 2, unknown: 1 }, err);
		assert_eq!("Color counts incorrect", err.to_string());
	}

	#[test]
	fn all_unknown() {
		let budget = budget(&"_".repeat(54)).unwrap();
		assert_eq!(54, budget.multiset().len());
		for color in ALL_COLORS {
			assert_eq!(9, budget.needed(color));
		}
	}
}
