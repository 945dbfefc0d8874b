//! Holiday banner synchronization.
//!
//! A daily job reads the calendar feed and keeps the managed holiday banners
//! of the V2 collection in line with it. Manually created banners are never touched.

mod client;
mod reconciler;
mod scheduler;
mod table;

pub use client::*;
pub use reconciler::*;
pub use scheduler::*;
pub use table::*;
