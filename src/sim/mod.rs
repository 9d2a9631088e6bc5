//! Battle rules: tables, modifiers, the move executor and the state machine.

pub mod abilities;
pub mod ai;
pub mod battle;
pub mod creature;
pub mod damage;
pub mod faint_handler;
pub mod items;
pub mod moves;
pub mod progression;
pub mod stats;
pub mod status;
pub mod switching;
pub mod turn_order;
pub mod weather;

pub use creature::{Creature, CreatureTemplate};
