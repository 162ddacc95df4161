pub mod connection;
pub mod lottery_repository;
pub mod post_repository;
pub mod repository;

#[cfg(test)]
pub mod memory;

pub use connection::*;
pub use lottery_repository::SeaOrmLotteryRepository;
pub use post_repository::SeaOrmPostRepository;
pub use repository::*;
