//! Puzzle implementations.

pub mod hanoi;
