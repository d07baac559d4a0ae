//! Tower of Hanoi game engine with a text interface and pluggable player stores.

pub mod cli;
pub mod engine;
pub mod games;
pub mod store;
