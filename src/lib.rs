//! Nutrition Dashboard Library
//!
//! Loads a nutrition CSV, computes comparison means, top-N rankings and
//! grouped sums, renders them as four PNG charts and serves a page listing
//! them. Shared by the server (`main.rs`) and the render-only binary.

pub mod charts;
pub mod config;
pub mod nutrition;
pub mod pipeline;
pub mod web;
