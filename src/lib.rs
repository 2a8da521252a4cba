//! Problem tracking for proofreading results in a live text editor
//!
//! A remote proofreading service reports problems as spans over a snapshot
//! of the document. This crate keeps those spans, their status and their
//! suggestions coherent while the user keeps editing, and implements
//! next/previous navigation, applying fixes and ignoring problems.
//!
//! The editor is reached through the [`host::EditorHost`] trait;
//! [`state::EditorState`] is a complete in-memory implementation.

pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod proofread;
pub mod state;
pub mod view;

pub use config::ProofreadConfig;
pub use error::CheckError;
pub use host::EditorHost;
pub use proofread::ProofreadSession;
pub use state::EditorState;
