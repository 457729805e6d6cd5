//! Text Source Adapter - 本地文本读取

mod file_text_source;

pub use file_text_source::{FileTextSource, TextSourceError};
