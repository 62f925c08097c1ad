//! Movie search through the third-party metadata provider.
//!
//! The provider's result shape varies between API versions, so results are
//! mapped through fixed alias tables into [`NormalizedMovie`] before they
//! reach the front-end.

pub mod normalize;
pub mod search;
pub mod types;

pub use search::*;
pub use types::*;
