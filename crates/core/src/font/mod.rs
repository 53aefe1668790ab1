//! Font metrics collaborators.
//!
//! Nothing in here is needed to decode a DVI stream; fonts can be defined
//! in a stream whose metrics files do not exist. These types serve
//! consumers that want to resolve character dimensions afterwards.

pub mod metrics;
pub mod tfm;

pub use metrics::{FilesystemResolver, FontMetricsProvider};
pub use tfm::TfmFile;
