//! Data models for banner records.
//!
//! The serialized shapes match what the downstream app reads from the banner files.

mod banner;
mod banner_v1;
mod banner_v2;
mod color;
mod version;

pub use banner::BannerRecord;
pub use banner_v1::*;
pub use banner_v2::*;
pub use color::*;
pub use version::*;
