//! Turns raw user input into download requests

pub mod input;
pub mod request;

pub use input::{clean_line, collect, split_urls, CollectOptions};
pub use request::{DownloadRequest, OutputKind, Quality};
