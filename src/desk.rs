//! Per-view data fetchers.
//!
//! A desk owns the API handle for one page and whatever query state that
//! page keeps between fetches. Results are returned whole; a view replaces
//! its state with each one rather than merging.

pub mod reports;
pub mod sensor;
pub mod staff;

pub use reports::ReportDesk;
pub use sensor::{FeedSnapshot, SensorFeed};
pub use staff::{AdminSnapshot, StaffDesk};
