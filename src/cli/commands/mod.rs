//! Command implementations for the gitsieve CLI

pub mod config;
pub mod find;
pub mod stat;
