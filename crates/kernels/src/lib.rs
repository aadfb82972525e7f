// Copyright 2025 Irreducible Inc.

//! Vector kernels for real-time neural network inference.
//!
//! Every layer in `rtnn_layers` is written against the [`VectorKernels`] contract: a small set
//! of allocation-free reductions, elementwise operations and nonlinearities over slices of a
//! [`Scalar`] element type. Two families of backends implement it:
//!
//! * [`Portable`], plain scalar loops that compile everywhere and serve as the numeric
//!   reference;
//! * [`Simd`], lane-parallel loops over SSE2/AVX2 registers on x86_64 and NEON registers on
//!   aarch64.
//!
//! The backend is picked at build time through [`OptimalKernels`]. Backends are zero-sized
//! types with associated functions only, so layers are monomorphized over them and there is no
//! dynamic dispatch on the inference path.

pub mod arch;
mod error;
mod kernels;
mod matrix;
mod scalar;

pub use arch::*;
pub use error::*;
pub use kernels::*;
pub use matrix::*;
pub use scalar::*;
