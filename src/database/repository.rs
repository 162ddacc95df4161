//! 持久化接口
//!
//! 服务层只通过这两个 trait 访问帖子与开奖轮次；生产环境使用 sea-orm 实现，
//! 单元测试使用内存实现。

use crate::entities::{
    lottery_round_entity::{self as rounds, WinnerEntry},
    post_entity as posts, user_entity as users,
};
use crate::error::AppResult;
use crate::models::{PostIdentifier, WinningNumber};
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub identifier: PostIdentifier,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewLotteryRound {
    pub draw_date: NaiveDate,
    pub winning_numbers: Vec<WinningNumber>,
}

/// 匹配到的帖子及其作者
#[derive(Debug, Clone)]
pub struct PostWithOwner {
    pub post: posts::Model,
    pub owner: users::Model,
}

impl From<PostWithOwner> for WinnerEntry {
    fn from(p: PostWithOwner) -> Self {
        WinnerEntry {
            user_id: p.owner.id,
            username: p.owner.username,
            phone: p.owner.phone,
            email: p.owner.email,
            post_id: p.post.id,
            post_identifier: p.post.identifier,
            post_title: p.post.title,
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 包含已软删除的帖子（编号永不回收）
    async fn exists_post_with_identifier(&self, identifier: &PostIdentifier) -> AppResult<bool>;

    /// 编号重复时返回 `AppError::Conflict`
    async fn insert_post(&self, post: NewPost) -> AppResult<posts::Model>;

    /// 不返回已删除的帖子
    async fn find_post_by_identifier(
        &self,
        identifier: &PostIdentifier,
    ) -> AppResult<Option<posts::Model>>;

    /// 未删除帖子，按创建顺序倒序
    async fn list_posts(&self, offset: u64, limit: u64) -> AppResult<(Vec<posts::Model>, u64)>;

    async fn soft_delete_post(&self, post_id: i64) -> AppResult<()>;

    /// 编号末三位等于任一号码的未删除帖子（并集，每个帖子最多出现一次），按 id 升序
    async fn find_posts_matching_trailing_digits(
        &self,
        numbers: &[WinningNumber],
    ) -> AppResult<Vec<PostWithOwner>>;
}

#[async_trait]
pub trait LotteryRepository: Send + Sync {
    async fn insert_round(&self, round: NewLotteryRound) -> AppResult<rounds::Model>;

    async fn find_round_by_id(&self, id: i64) -> AppResult<Option<rounds::Model>>;

    /// `is_active` 为 None 时返回全部，按 id 倒序
    async fn list_rounds(&self, is_active: Option<bool>) -> AppResult<Vec<rounds::Model>>;

    /// 写入中奖名单并关闭轮次，仅当轮次仍处于 active 时生效。
    /// 返回 false 表示轮次已被其他请求开奖。
    async fn commit_draw(&self, id: i64, winners: Vec<WinnerEntry>) -> AppResult<bool>;
}
