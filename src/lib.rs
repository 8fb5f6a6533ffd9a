pub mod config;
pub mod error;
pub mod markdown;
pub mod stream;

pub use markdown::{convert, markdown_to_html};
