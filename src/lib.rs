pub mod error;
pub use error::*;

pub mod config;
pub mod fetcher;
pub mod logger;
pub mod provider;
pub mod record;
pub mod resolver;
pub mod syncer;

mod wrapper;
