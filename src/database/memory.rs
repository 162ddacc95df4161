//! 单元测试用的内存存储

use super::repository::{
    LotteryRepository, NewLotteryRound, NewPost, PostRepository, PostWithOwner,
};
use crate::entities::{
    lottery_round_entity::{self as rounds, WinnerEntry, WinnerList, WinningNumberList},
    post_entity as posts, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{PostIdentifier, WinningNumber};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
struct Inner {
    users: Vec<users::Model>,
    posts: Vec<posts::Model>,
    rounds: Vec<rounds::Model>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    exists_checks: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: i64, username: &str, phone: &str) -> users::Model {
        let user = users::Model {
            id,
            username: username.to_string(),
            phone: phone.to_string(),
            email: Some(format!("{username}@example.com")),
            is_admin: false,
            created_at: Some(Utc::now()),
        };
        self.inner.lock().unwrap().users.push(user.clone());
        user
    }

    /// 直接写入一条帖子（绕过编号生成）
    pub fn add_post(&self, user_id: i64, identifier: &str) -> posts::Model {
        let mut inner = self.inner.lock().unwrap();
        let post = posts::Model {
            id: inner.posts.len() as i64 + 1,
            identifier: identifier.to_string(),
            user_id,
            title: format!("post {identifier}"),
            content: "content".to_string(),
            image_url: None,
            deleted_at: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        inner.posts.push(post.clone());
        post
    }

    pub fn round(&self, id: i64) -> Option<rounds::Model> {
        self.inner
            .lock()
            .unwrap()
            .rounds
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn post_count(&self) -> usize {
        self.inner.lock().unwrap().posts.len()
    }

    pub fn exists_checks(&self) -> u64 {
        self.exists_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn exists_post_with_identifier(&self, identifier: &PostIdentifier) -> AppResult<bool> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .posts
            .iter()
            .any(|p| p.identifier == identifier.as_str()))
    }

    async fn insert_post(&self, post: NewPost) -> AppResult<posts::Model> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .posts
            .iter()
            .any(|p| p.identifier == post.identifier.as_str())
        {
            return Err(AppError::Conflict(format!(
                "Post identifier {} is already taken",
                post.identifier
            )));
        }
        let now = Utc::now();
        let model = posts::Model {
            id: inner.posts.len() as i64 + 1,
            identifier: post.identifier.into_inner(),
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            deleted_at: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.posts.push(model.clone());
        Ok(model)
    }

    async fn find_post_by_identifier(
        &self,
        identifier: &PostIdentifier,
    ) -> AppResult<Option<posts::Model>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .posts
            .iter()
            .find(|p| p.identifier == identifier.as_str() && p.deleted_at.is_none())
            .cloned())
    }

    async fn list_posts(&self, offset: u64, limit: u64) -> AppResult<(Vec<posts::Model>, u64)> {
        let inner = self.inner.lock().unwrap();
        let live: Vec<_> = inner
            .posts
            .iter()
            .rev()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect();
        let total = live.len() as u64;
        let items = live
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn soft_delete_post(&self, post_id: i64) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(p) = inner
            .posts
            .iter_mut()
            .find(|p| p.id == post_id && p.deleted_at.is_none())
        {
            p.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn find_posts_matching_trailing_digits(
        &self,
        numbers: &[WinningNumber],
    ) -> AppResult<Vec<PostWithOwner>> {
        let inner = self.inner.lock().unwrap();
        let matched = inner
            .posts
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .filter(|p| {
                PostIdentifier::parse(&p.identifier)
                    .is_ok_and(|id| numbers.iter().any(|n| n.matches(&id)))
            })
            .filter_map(|p| {
                let owner = inner.users.iter().find(|u| u.id == p.user_id)?;
                Some(PostWithOwner {
                    post: p.clone(),
                    owner: owner.clone(),
                })
            })
            .collect();
        Ok(matched)
    }
}

#[async_trait]
impl LotteryRepository for MemoryStore {
    async fn insert_round(&self, round: NewLotteryRound) -> AppResult<rounds::Model> {
        let mut inner = self.inner.lock().unwrap();
        let model = rounds::Model {
            id: inner.rounds.len() as i64 + 1,
            draw_date: round.draw_date,
            winning_numbers: WinningNumberList(
                round
                    .winning_numbers
                    .iter()
                    .map(|n| n.as_str().to_string())
                    .collect(),
            ),
            is_active: true,
            winners: WinnerList::default(),
            created_at: Some(Utc::now()),
            drawn_at: None,
        };
        inner.rounds.push(model.clone());
        Ok(model)
    }

    async fn find_round_by_id(&self, id: i64) -> AppResult<Option<rounds::Model>> {
        Ok(self.round(id))
    }

    async fn list_rounds(&self, is_active: Option<bool>) -> AppResult<Vec<rounds::Model>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rounds
            .iter()
            .rev()
            .filter(|r| is_active.is_none_or(|active| r.is_active == active))
            .cloned()
            .collect())
    }

    async fn commit_draw(&self, id: i64, winners: Vec<WinnerEntry>) -> AppResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rounds.iter_mut().find(|r| r.id == id && r.is_active) {
            Some(round) => {
                round.winners = WinnerList(winners);
                round.is_active = false;
                round.drawn_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
