//! Call Studio — scripted sales-call simulator with post-call analytics.

pub mod analytics;
pub mod call;
pub mod channels;
pub mod config;
pub mod error;
pub mod script;
pub mod studio;
pub mod voice;
