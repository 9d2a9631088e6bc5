pub mod dex;
pub mod moves;
pub mod species;
pub mod types;

pub use dex::{sample_dex, Dex, MoveResolver, SpeciesResolver};
