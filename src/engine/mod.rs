// src/engine/mod.rs

//! Execution-tracking engine.
//!
//! This module ties together:
//! - the completion collector, the single consumer that moves executor
//!   results into the registry ([`collector`])
//! - the agent, which owns the registry, the executor backend and the
//!   terminator, and implements submit / status / synchronous wait /
//!   find-and-stop ([`agent`])

pub mod agent;
pub mod collector;

pub use agent::{Agent, AgentSettings, Submission};
pub use collector::{CollectorHandle, spawn_collector};
