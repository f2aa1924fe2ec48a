pub mod analysis;
pub mod cli;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod report;
pub mod rules;
pub mod scorer;
pub mod section;
pub mod snapshot;

pub use error::{CtaError, Result};
