//! Stackable modal dialogs for Koala documents.
//!
//! # Scope
//!
//! This crate provides:
//! - **Dialog** - overlay and wrapper nodes, open/close/destroy lifecycle,
//!   buttons, titles and Escape handling
//! - **Stacking** - increasing `z-index` values so the last opened dialog is
//!   on top
//! - **Configuration** - builder-style options and a JSON form
//! - **Environment** - one-time detection of hosts needing the legacy
//!   overlay fix
//!
//! # Example
//!
//! ```ignore
//! use koala_dialog::{ButtonMap, Dialog, DialogOptions, Host};
//! use koala_dom::Document;
//!
//! let host = Host::new(Document::default().into_handle());
//! let dialog = Dialog::new(
//!     &host,
//!     DialogOptions::default()
//!         .with_title("Save changes?")
//!         .with_buttons(ButtonMap::closing(["Discard", "Save"])),
//! )?;
//! dialog.close();
//! ```

pub mod config;
pub mod dialog;
pub mod environment;
pub mod host;
pub mod options;
pub mod stack;

pub use config::DialogConfig;
pub use dialog::{Dialog, DialogNodes, DialogState};
pub use environment::Environment;
pub use host::Host;
pub use options::{ButtonMap, DialogOptions, Escape, Handler, close_handler, handler};
pub use stack::{BASE_Z_INDEX, StackManager};

use koala_dom::DomError;
use thiserror::Error;

/// Error type for dialog operations.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The dialog's nodes were already removed.
    #[error("dialog has been destroyed")]
    Destroyed,
    /// The document has no `<body>` to attach the dialog to.
    #[error("document has no body element")]
    NoBody,
    /// A tree mutation failed, e.g. because page script moved a dialog node.
    #[error(transparent)]
    Dom(#[from] DomError),
    /// JSON configuration could not be read.
    #[error("invalid dialog configuration: {0}")]
    Config(#[from] serde_json::Error),
}
