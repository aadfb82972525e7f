// Copyright 2025 Irreducible Inc.

//! Real-time neural network layers.
//!
//! Every layer implements the [`Layer`] contract: fixed input and output widths decided at
//! construction, a `forward` call that maps one input frame to one output frame, and a `reset`
//! that clears any recurrent state. All buffers a layer touches are allocated when it is
//! constructed, so `forward` and `reset` never allocate, lock, log or fail.
//!
//! Layers are generic over the element type and over the [`VectorKernels`] backend, which
//! defaults to the build target's [`OptimalKernels`].
//!
//! [`VectorKernels`]: rtnn_kernels::VectorKernels
//! [`OptimalKernels`]: rtnn_kernels::OptimalKernels

mod activation;
mod config;
mod conv1d;
mod dense;
mod error;
mod gru;
mod layer;
mod lstm;
mod model;

pub use activation::*;
pub use config::*;
pub use conv1d::*;
pub use dense::*;
pub use error::*;
pub use gru::*;
pub use layer::*;
pub use lstm::*;
pub use model::*;
pub use rtnn_kernels::{OptimalKernels, Portable, Scalar, VectorKernels};
