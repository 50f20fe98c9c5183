//! Data models for the catalog admin service.
//!
//! Category and subtitle shapes match the storefront API's JSON exactly so that
//! server responses can replace local state without translation.

mod category;
mod draft;
mod node;
mod tree;
mod wire;

pub use category::*;
pub use draft::*;
pub use node::*;
pub use tree::*;
pub use wire::*;
