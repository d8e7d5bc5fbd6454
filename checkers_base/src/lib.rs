//! # Base types for checkers
//!
//! This is an auxiliary crate for `checkers`, which contains some core stuff. It was split from the main crate,
//! so everything declared here can be used in the build script for `checkers`.
//!
//! Normally you don't want to use this crate directly. Use `checkers` instead.

pub mod bitboard;
pub mod bitboard_consts;
pub mod geometry;
pub mod types;
