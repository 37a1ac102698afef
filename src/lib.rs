// ABOUTME: Library crate for anubis-ide: session lifecycle client for Anubis Cloud IDEs
//
// The pieces, bottom up:
// - models: session and settings data shapes
// - api: HTTP client plus the response-envelope normalizer
// - ide: lifecycle core (launch, poll, stop) over a pluggable API handle
// - config: ~/.anubis/config.toml and poll tuning
// - app / components: the dialog TUI
// - cli: launch/stop/status subcommands

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod ide;
pub mod models;
