//! `flowdist` command implementations, kept in a library so they can be
//! exercised without spawning the binary.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
