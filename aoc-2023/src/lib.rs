//! Advent of Code 2023 solutions with automatic registration
//!
//! Each day under [`year_2023`] derives `AocSolver` and `AutoRegisterSolver`,
//! so linking this crate is enough for its solvers to show up in
//! `SolverRegistryBuilder::register_all_plugins`.
//!
//! Day 5 is a thin parser in front of [`almanac`], which maps whole ranges
//! of seeds through the almanac's stages without expanding them.

pub mod almanac;
pub mod year_2023;
