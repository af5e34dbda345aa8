//! Command line front end, prints one JSON response per invocation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{rng, rngs::StdRng, SeedableRng};
use rubiks_cube_checker::{Alphabet, Checker, FaceletState, Settings};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;



/// Checks 3x3x3 cube states and completes partially known ones
#[derive(Parser)]
#[command(name = "cubecheck", version, about)]
struct Cli {
	/// Six color symbols, in home-face order U R F D L B
	#[arg(long, global = true, default_value = "WRGYOB")]
	colors: String,
	/// Symbol for a sticker whose color is not known
	#[arg(long, global = true, default_value_t = '_')]
	unknown: char,
	/// Maximum number of completions returned for a partial state
	#[arg(long, global = true)]
	cap: Option<usize>,
	/// Candidates checked per parallel round
	#[arg(long, global = true)]
	batch_size: Option<usize>,
	/// Longest solution searched for optimally before the two-phase solver
	#[arg(long, global = true)]
	witness_depth: Option<u32>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Classify a state as invalid, solved, valid or partial
	Check {
		/// 54 stickers, faces in U R F D L B order
		state: String,
	},
	/// Apply a turn (or a sequence like "R U R' U'") to a state
	Apply {
		state: String,
		moves: String,
	},
	/// Generate a randomly scrambled state
	Scramble {
		#[arg(long)]
		length: Option<u32>,
		/// Seed for a reproducible scramble
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Print a state as an unfolded net
	Show {
		state: String,
	},
}

impl Cli {
	fn settings(&self) -> Result<Settings> {
		let defaults = Settings::default();
		Ok(Settings {
			alphabet: Alphabet::new(&self.colors, self.unknown).context("invalid alphabet")?,
			result_cap: self.cap.unwrap_or(defaults.result_cap),
			batch_size: self.batch_size.unwrap_or(defaults.batch_size),
			witness_depth: self.witness_depth.unwrap_or(defaults.witness_depth),
			scramble_length: match &self.command {
				Commands::Scramble { length: Some(length), .. } => *length,
				_ => defaults.scramble_length,
			},
		})
	}
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();
	let checker = Checker::new(cli.settings()?);
	info!(settings = ?checker.settings(), "starting");

	match cli.command {
		Commands::Check { state } => print_json(&checker.check(&state)),
		Commands::Apply { state, moves } => print_json(&checker.apply_moves(&state, &moves)),
		Commands::Scramble { seed, .. } => {
			let response = match seed {
				Some(seed) => checker.random_state(&mut StdRng::seed_from_u64(seed)),
				None => checker.random_state(&mut rng()),
			};
			print_json(&response)
		}
		Commands::Show { state } => {
			let alphabet = checker.settings().alphabet;
			let state = FaceletState::parse(&state, &alphabet)?;
			print!("{}", state.to_net(&alphabet));
			Ok(())
		}
	}
}
