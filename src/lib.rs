//! Client library and CLI for the ezyVet practice management API.
//!
//! The library handles OAuth client-credentials tokens (stored between runs
//! and refreshed when the API rejects them), walks the paginated list
//! endpoints, and formats the returned records.
//!
//! # Modules
//!
//! - `auth`: Token acquisition, validation and refresh
//! - `client`: The API client and the pagination loop
//! - `resources`: The table of list endpoints and their accessors
//! - `appointment_status`: Appointment status id/name lookup
//! - `configuration`: Configuration management
//! - `filter`: Query filters for list endpoints
//! - `format`: Data formatting utilities for various output formats
//! - `token_store`: Token persistence on disk
//! - `commands`, `actions`, `cli`: The command-line interface

pub mod actions;
pub mod appointment_status;
pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod format;
pub mod param_utils;
pub mod resources;
pub mod token_store;
