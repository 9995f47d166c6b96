mod usage;

pub use usage::{format_timestamp, UsageRecord};
