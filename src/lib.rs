//! # eventb-to-txt
//!
//! Converts Event-B models stored by the Rodin platform (`.buc` context files
//! and `.bum` machine files) into a readable plain-text form. It is designed
//! to be used by the `eventb-to-txt` command-line tool but can be embedded in
//! other applications that need to inspect or diff Event-B models as text.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use eventb_to_txt::extract::extract_str;
//! use eventb_to_txt::model::ArtifactKind;
//! use eventb_to_txt::render::RenderOptions;
//!
//! let xml = r#"<org.eventb.core.contextFile>
//!   <org.eventb.core.carrierSet name="s" org.eventb.core.identifier="COLOURS"/>
//! </org.eventb.core.contextFile>"#;
//!
//! let context = extract_str(xml, Path::new("traffic/C0.buc"), ArtifactKind::Context).unwrap();
//! let text = context.render(&RenderOptions::default());
//! assert_eq!(text, "context C0\n\nsets\n    COLOURS\n\nend\n");
//! ```
//!
//! ## Core Concepts
//!
//! - **Model (`model`)**: In-memory records for contexts, machines and their
//!   elements. A parsed file is an `Artifact`.
//! - **Extraction (`extract`)**: Reads Rodin XML into artifacts.
//! - **Registry (`registry`)**: All artifacts of one model directory, keyed by
//!   component name.
//! - **Rendering (`render`)**: Turns an artifact into text.
//! - **Phases (`phases`)**: The conversion pipeline, including the resolver
//!   that orders components so every referenced component is printed before
//!   the components that refine, see or extend it.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::convert`:
//!
//! 1.  **Input**: A zip archive is unpacked into a temporary directory.
//! 2.  **Discovery**: Model files are found and grouped by directory.
//! 3.  **Extraction**: Each group is parsed into a registry.
//! 4.  **Ordering**: In merge mode, each registry is resolved into a print
//!     queue; cycles and unknown references abort the run.
//! 5.  **Writing**: Output paths are planned for all groups, checked for
//!     collisions, and the rendered text is written.

pub mod archive;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod phases;
pub mod registry;
pub mod render;

#[cfg(test)]
mod resolver_proptest;
