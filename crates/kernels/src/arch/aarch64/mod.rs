// Copyright 2025 Irreducible Inc.

pub mod neon;

pub type F32Lanes = neon::F32x4;
pub type F64Lanes = neon::F64x2;
