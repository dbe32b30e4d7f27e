//! Helper functions shared by the loaders and the view layer

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
