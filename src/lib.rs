// ABOUTME: Library root for sidechat — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod client;
pub mod config;
pub mod exchange;
pub mod transcript;
pub mod tui;
