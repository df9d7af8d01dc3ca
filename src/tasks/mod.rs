//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: drops expired lookup results at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
