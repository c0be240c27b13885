//! Advent of Code 2022 puzzle solutions with automatic registration
//!
//! Each day lives in its own module under [`year_2022`] and uses the
//! `AutoRegisterSolver` derive macro, so linking this crate is enough for
//! the solvers to show up in a plugin registry.

pub mod utils;
pub mod year_2022;
