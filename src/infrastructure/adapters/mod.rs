//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod credential;
pub mod generation;
pub mod text_source;

pub use credential::*;
pub use generation::*;
pub use text_source::*;
