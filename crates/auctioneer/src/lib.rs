//! Timed auction coordination for chat communities.
//!
//! Officers queue items, members bid in dedicated channels, and the run
//! loop times the auctions out, announces standing updates and hands the
//! final results back for acceptance. The chat platform itself stays
//! behind the [`infra::sink::MessageSink`] trait, so the service can be
//! embedded into any gateway.

pub mod arguments;
pub mod domain;
pub mod infra;
pub mod run;
pub mod run_loop;
#[cfg(test)]
mod tests;

pub use self::run::{run, start};
