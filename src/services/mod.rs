pub mod identifier_generator;
pub mod lottery_service;
pub mod post_service;

pub use identifier_generator::*;
pub use lottery_service::*;
pub use post_service::*;
