pub mod config;
pub mod error;
pub mod logging;

pub mod catalog;
pub mod form;
pub mod game;
pub mod http;
pub mod links;
pub mod naming;
pub mod page;
pub mod storage;

pub use catalog::Catalog;
pub use error::{Result, ScrapeError};
