//! Terminal front end: timer, keyboard and drawing around a [`crate::game::Session`]

pub mod scheduler;
pub mod terminal;

pub use scheduler::TickScheduler;
pub use terminal::{Screen, TerminalApp};
