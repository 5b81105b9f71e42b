//! pipcheck - PyPI package compatibility checker library
//!
//! This library provides the core functionality for checking whether a
//! set of PyPI packages is mutually compatible:
//! - Version comparison and specifier parsing
//! - Constraint range intersection
//! - Pairwise compatibility evaluation
//! - PyPI metadata fetching with caching

pub mod cli;
pub mod compat;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
