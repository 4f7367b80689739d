//! # Org Capture
//!
//! A small HTTP endpoint that appends submitted notes to an org-mode file.
//!
//! ## Pipeline
//!
//! - **Decode** - the request body becomes a [`Note`], leniently
//! - **Render** - the note becomes an [`Entry`] (`** TODO <headline>\n<body>\n\n`)
//! - **Append** - [`CaptureFile`] adds the entry to the end of the target file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use org_capture::{CaptureFile, Config, Entry, Note};
//!
//! let config = Config::with_target("/home/me/org", "web-captures.org");
//! let file = CaptureFile::from_config(&config);
//!
//! let note = Note::decode_lenient(br#"{"headline":"Buy milk","body":"2%"}"#);
//! file.append(&Entry::from(&note))?;
//! # Ok::<(), org_capture::Error>(())
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use capture::{Entry, Note};
pub use config::Config;
pub use error::{Error, Result};
pub use server::{router, AppState};
pub use storage::CaptureFile;
