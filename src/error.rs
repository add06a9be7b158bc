//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `eventb-to-txt` library. It uses the `thiserror` library to create a
//! single `Error` enum that covers every anticipated failure mode of a
//! conversion run.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to a specific kind
//!   of failure and carries the names or paths involved, so callers can tell
//!   a broken model apart from an I/O problem.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into three groups:
//!
//! - Model hierarchy errors raised while the print order is resolved
//!   (`UnknownReference`, `CyclicReference`, `NamingCollision`). These are
//!   always fatal and are raised before any output file is touched.
//! - Extraction errors raised while reading Rodin XML files (`XmlParse`,
//!   `MissingAttribute`, `Extract`).
//! - Environment errors (`NoModels`, `InvalidInput`, `OutputCollision`,
//!   `Filesystem`, `Archive`, `ConfigParse`, `Yaml`, `Io`).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for eventb-to-txt operations
#[derive(Error, Debug)]
pub enum Error {
    /// An artifact references a name that is not present in the registry.
    #[error("Unknown reference: '{from}' refers to '{to}', which is not part of the model")]
    UnknownReference { from: String, to: String },

    /// A print queue was requested for a name that is not registered.
    #[error("Unknown artifact: '{name}' is not part of the model")]
    UnknownArtifact { name: String },

    /// The reference graph contains a cycle.
    ///
    /// `cycle` starts and ends with the same artifact name.
    #[error("Cyclic reference detected: {}", cycle.join(" -> "))]
    CyclicReference { cycle: Vec<String> },

    /// Two artifacts in one registry share a name.
    #[error("Naming collision: '{name}' is declared by both {} and {}", first.display(), second.display())]
    NamingCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A model file is not well-formed XML.
    #[error("XML parsing error in {}: {message}", path.display())]
    XmlParse { path: PathBuf, message: String },

    /// A model element lacks an attribute Rodin always writes.
    #[error("Missing attribute '{attribute}' on <{element}> in {}", path.display())]
    MissingAttribute {
        path: PathBuf,
        element: String,
        attribute: String,
    },

    /// A model file is well-formed XML but not a valid Event-B component.
    #[error("Invalid model file {}: {message}", path.display())]
    Extract { path: PathBuf, message: String },

    /// The input contains no context or machine files.
    #[error("It seems that {} does not contain any Event-B models", path.display())]
    NoModels { path: PathBuf },

    /// The input path cannot be used as a model source.
    #[error("Invalid input {}: {message}", path.display())]
    InvalidInput { path: PathBuf, message: String },

    /// Two model groups would write to the same output file.
    #[error("Output collision: {} would be written by both '{first}' and '{second}'", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// An error occurred while creating or writing output files.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A zip archive could not be opened or extracted.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An error occurred while reading the configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
