//! Rubiks Cube state checker: validation, solvability and completion of partially known states.

pub mod budget;
pub mod checker;
pub mod completion;
pub mod config;
mod cubie;
pub mod facelet;
pub mod moves;
pub mod oracle;
pub mod permutations;
mod two_phase;
mod witness;

pub use checker::{ApplyResponse, CheckResponse, Checker, RandomStateResponse};
pub use config::{Alphabet, Settings};
pub use facelet::FaceletState;
