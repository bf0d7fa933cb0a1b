//! SpaceHub CLI library.
//!
//! Argument definitions and command handlers for the `spacehub` binary.

pub mod cli;
pub mod commands;
