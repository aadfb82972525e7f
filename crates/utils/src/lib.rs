// Copyright 2025 Irreducible Inc.

//! Shared helpers for the `rtnn` crates: error-return macros, environment flags and
//! diagnostic logging setup.

pub mod env;
pub mod error_utils;
pub mod tracing;
