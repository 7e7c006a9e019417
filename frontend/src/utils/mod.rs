pub mod dates;
pub mod download;
pub mod export;
pub mod navigation;
pub mod search;
pub mod storage;
pub mod token;
pub mod validation;

pub use download::{trigger_bytes_download, trigger_csv_download};
