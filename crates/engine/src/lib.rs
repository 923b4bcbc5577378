//! The Retro Engine node: an editor node that runs a retro game emulator in a
//! floating panel and feeds its current frame into the graph.

pub mod assets;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod controls;
pub mod errors;
pub mod executor;
pub mod host;
pub mod lifecycle;
pub mod node;
pub mod node_definition;
pub mod prompt;
pub mod sentinels;
pub mod session;
pub mod sync;
pub mod systems;

#[cfg(test)]
mod testing;

pub use node::{NodeHooks, RetroEngineNode};
