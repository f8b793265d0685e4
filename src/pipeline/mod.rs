//! Pipeline module - the preparation steps, leaf first

pub mod error;
pub mod loader;
pub mod outliers;
pub mod prepare;
pub mod scaler;
pub mod schema;
pub mod separate;
pub mod source;
pub mod split;

pub use error::{Result, WrangleError};
pub use loader::*;
pub use outliers::*;
pub use prepare::*;
pub use scaler::*;
pub use schema::*;
pub use separate::*;
pub use source::*;
pub use split::*;
