//! Deterministic simulation core for a vertically scrolling arcade shooter.
//!
//! Everything here is plain data plus tick-driven update functions. The
//! binary crate owns the terminal, input and frame pacing; this library
//! only needs an input record, a tick counter and an injected RNG.

pub mod arena;
pub mod boss;
pub mod combo;
pub mod compute;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod explosion;
pub mod frame;
pub mod geometry;
pub mod level;
pub mod patterns;
pub mod player;
pub mod projectile;
