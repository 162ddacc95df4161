pub mod common;
pub mod lottery;
pub mod pagination;
pub mod post;
pub mod post_identifier;

pub use common::*;
pub use lottery::*;
pub use pagination::*;
pub use post::*;
pub use post_identifier::*;
