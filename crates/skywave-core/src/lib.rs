pub mod config;
pub mod error;
pub mod location;
pub mod notify;
pub mod types;

pub use config::*;
pub use error::*;
pub use location::*;
pub use notify::*;
pub use types::*;
