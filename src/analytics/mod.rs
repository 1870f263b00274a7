//! Post-call analytics — conversion, talk ratio, objections, recent calls.

pub mod objections;
pub mod stats;

pub use objections::{ObjectionCategory, ObjectionClassifier};
pub use stats::{CallStats, RecentCall, StatsOptions, compute, recent_calls, talk_ratio};
