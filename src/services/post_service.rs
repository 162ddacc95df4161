use crate::database::{NewPost, PostRepository};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::IdentifierGenerator;
use crate::utils::with_timeout;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    generator: IdentifierGenerator,
    operation_timeout: Duration,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        identifier_max_attempts: u32,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            generator: IdentifierGenerator::new(posts.clone(), identifier_max_attempts),
            posts,
            operation_timeout,
        }
    }

    /// 发帖：校验 -> 生成编号 -> 写入
    /// 编号耗尽 (IdentifierExhaustion) 直接失败，不在此处重试
    pub async fn create_post(
        &self,
        user_id: i64,
        request: CreatePostRequest,
    ) -> AppResult<PostResponse> {
        let title = request.validate()?;

        with_timeout(self.operation_timeout, "create post", async {
            let identifier = self.generator.generate().await?;
            let post = self
                .posts
                .insert_post(NewPost {
                    identifier,
                    user_id,
                    title,
                    content: request.content,
                    image_url: request.image_url,
                })
                .await?;

            log::info!("Post {} created by user {user_id}", post.identifier);
            Ok::<_, AppError>(PostResponse::from(post))
        })
        .await
    }

    pub async fn get_post(&self, identifier: &str) -> AppResult<PostResponse> {
        let identifier = PostIdentifier::parse(identifier)
            .map_err(|_| AppError::NotFound("Post not found".to_string()))?;
        self.posts
            .find_post_by_identifier(&identifier)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    pub async fn list_posts(&self, query: &PostQuery) -> AppResult<PaginatedResponse<PostResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let (items, total) = self
            .posts
            .list_posts(params.get_offset(), params.get_limit())
            .await?;
        let items = items.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 软删除；编号保留，不会再分配给其他帖子
    pub async fn delete_post(&self, user_id: i64, identifier: &str) -> AppResult<()> {
        let identifier = PostIdentifier::parse(identifier)
            .map_err(|_| AppError::NotFound("Post not found".to_string()))?;
        let post = self
            .posts
            .find_post_by_identifier(&identifier)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        if post.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        self.posts.soft_delete_post(post.id).await?;
        log::info!("Post {identifier} deleted by user {user_id}");
        Ok(())
    }
}
