pub mod admin;
pub mod lottery;
pub mod post;

pub use admin::admin_config;
pub use lottery::lottery_config;
pub use post::post_config;
