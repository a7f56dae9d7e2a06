//! Core error types for wireflow-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! all anticipated failure modes in the dataflow graph engine.

use crate::link::Link;
use thiserror::Error;

/// Errors produced by the wireflow-core crate.
///
/// No variant is fatal: every public operation either completes fully or
/// leaves the graph unchanged.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A box with this name already exists in the graph.
    #[error("duplicate box name: '{name}'")]
    DuplicateName { name: String },

    /// No box with this name exists in the graph.
    #[error("box not found: '{name}'")]
    BoxNotFound { name: String },

    /// The exact link tuple is not present in the graph.
    #[error("link not found: {link}")]
    LinkNotFound { link: Link },

    /// A proposed link failed validation.
    #[error("invalid link: {reason}")]
    InvalidLink { reason: String },

    /// A parameter value was rejected by its descriptor.
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A named action is not declared for the box type.
    #[error("unknown action: '{name}'")]
    UnknownAction { name: String },

    /// The proposed link would close a directed cycle.
    #[error("link from '{src}' to '{dest}' would close a cycle")]
    CycleDetected { src: String, dest: String },

    /// Attempting to register a box type name that already exists.
    #[error("duplicate box type name: '{name}'")]
    DuplicateTypeName { name: String },

    /// No box type with this name is registered in the catalog.
    #[error("unknown box type: '{name}'")]
    UnknownBoxType { name: String },
}
