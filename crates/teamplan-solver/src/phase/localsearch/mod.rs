//! Local search phase
//!
//! Improves a fully assigned plan by evaluating a sample of candidate
//! moves per step and applying the best one the acceptor lets through.

pub mod acceptor;
mod forager;
mod phase;

pub use acceptor::{Acceptor, HillClimbingAcceptor, SimulatedAnnealingAcceptor, TabuSearchAcceptor};
pub use forager::{AcceptedCountForager, LocalSearchForager};
pub use phase::LocalSearchPhase;
