//! Triage of scrape-run logs and the bounded-retry media fetch that feeds them.
//!
//! The fetch side ([`job`], [`fetch`]) writes one session per entity to a run
//! log. The triage side ([`segment`], [`filter`], [`classify`], [`router`],
//! driven by [`triage`]) reads it back after the job has exited. Both sides
//! share the line formats in [`line`].

pub mod config;
pub mod logging;

pub mod classify;
pub mod fetch;
pub mod filter;
pub mod job;
pub mod line;
pub mod router;
pub mod segment;
pub mod triage;
