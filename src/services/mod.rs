// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod directory;
pub mod seed;

pub use directory::DirectoryService;
pub use seed::{seed, seed_activities};
