// LinkStash shared type definitions
// Each submodule defines types used across the crate.

pub mod config;
pub mod errors;
pub mod item;
pub mod preview;
pub mod quota;
