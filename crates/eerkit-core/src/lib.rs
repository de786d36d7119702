//! Core types for eerkit.
//!
//! This crate holds the pieces shared by every stage of the toolkit:
//!
//! - [`normalize`] canonicalizes free-text identifiers into graph-safe names.
//! - [`model`] is the in-memory Extended Entity-Relationship schema.
//! - [`error`] defines the failures that can happen while a model is built.

pub mod error;
pub mod model;
pub mod normalize;

pub use error::ConstructionError;
