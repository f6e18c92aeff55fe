pub mod cli;
pub mod collator;
pub mod error;

pub use collator::{Collator, Summary, OUTPUT_FILE_NAME};
pub use error::CollateError;
