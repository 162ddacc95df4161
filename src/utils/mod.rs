pub mod jwt;
pub mod phone;
pub mod timeout;

pub use jwt::*;
pub use phone::*;
pub use timeout::with_timeout;
