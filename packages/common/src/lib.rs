pub mod capability;
pub mod error;
pub mod plugin;
pub mod result;
pub mod section;
pub mod visitor;

pub use capability::*;
pub use error::*;
pub use plugin::*;
pub use result::*;
pub use section::*;
pub use visitor::*;
