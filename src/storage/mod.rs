//! Storage backends for org-capture

mod org_file;

pub use org_file::CaptureFile;
