pub mod lottery_rounds;
pub mod posts;
pub mod users;

pub use lottery_rounds as lottery_round_entity;
pub use posts as post_entity;
pub use users as user_entity;
