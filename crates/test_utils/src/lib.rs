// Copyright 2025 Irreducible Inc.

//! Test support shared by the `rtnn` crates.
//!
//! The reference layers in [`reference`] are deliberately naive: nested `Vec`s, `f64`
//! arithmetic and one loop per formula term, reading weights in the same packed external layout
//! the real layers load. They play the role of the training framework's exported outputs.

pub mod fixtures;
pub mod reference;
pub mod tolerance;
