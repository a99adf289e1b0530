pub mod client;
pub mod config;
pub mod error;

pub use client::{ClientBrief, ClientRecord, Field};
pub use config::{OutputFormat, Settings};
pub use error::{ClientError, Result};
