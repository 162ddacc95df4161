use super::repository::{NewPost, PostRepository, PostWithOwner};
use crate::entities::{post_entity as posts, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{PostIdentifier, WinningNumber};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

#[derive(Clone)]
pub struct SeaOrmPostRepository {
    pool: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn exists_post_with_identifier(&self, identifier: &PostIdentifier) -> AppResult<bool> {
        // 软删除的帖子同样计入，保证编号不会被回收
        let count = posts::Entity::find()
            .filter(posts::Column::Identifier.eq(identifier.as_str()))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn insert_post(&self, post: NewPost) -> AppResult<posts::Model> {
        let identifier = post.identifier.into_inner();
        let result = posts::ActiveModel {
            identifier: Set(identifier.clone()),
            user_id: Set(post.user_id),
            title: Set(post.title),
            content: Set(post.content),
            image_url: Set(post.image_url),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match result {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                // 并发生成了相同编号：唯一索引兜底
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::Conflict(format!(
                    "Post identifier {identifier} is already taken"
                ))),
                _ => Err(e.into()),
            },
        }
    }

    async fn find_post_by_identifier(
        &self,
        identifier: &PostIdentifier,
    ) -> AppResult<Option<posts::Model>> {
        let post = posts::Entity::find()
            .filter(posts::Column::Identifier.eq(identifier.as_str()))
            .filter(posts::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?;
        Ok(post)
    }

    async fn list_posts(&self, offset: u64, limit: u64) -> AppResult<(Vec<posts::Model>, u64)> {
        let base_query = posts::Entity::find().filter(posts::Column::DeletedAt.is_null());

        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_desc(posts::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn soft_delete_post(&self, post_id: i64) -> AppResult<()> {
        let now = Utc::now();
        posts::Entity::update_many()
            .col_expr(posts::Column::DeletedAt, Expr::value(now))
            .col_expr(posts::Column::UpdatedAt, Expr::value(now))
            .filter(posts::Column::Id.eq(post_id))
            .filter(posts::Column::DeletedAt.is_null())
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_posts_matching_trailing_digits(
        &self,
        numbers: &[WinningNumber],
    ) -> AppResult<Vec<PostWithOwner>> {
        if numbers.is_empty() {
            return Ok(Vec::new());
        }

        // 一次查询：identifier LIKE '%123' OR identifier LIKE '%045' ...
        let condition = numbers.iter().fold(Condition::any(), |cond, n| {
            cond.add(posts::Column::Identifier.ends_with(n.as_str()))
        });

        let rows = posts::Entity::find()
            .filter(posts::Column::DeletedAt.is_null())
            .filter(condition)
            .find_also_related(users::Entity)
            .order_by_asc(posts::Column::Id)
            .all(&self.pool)
            .await?;

        let matched = rows
            .into_iter()
            .filter_map(|(post, owner)| match owner {
                Some(owner) => Some(PostWithOwner { post, owner }),
                None => {
                    log::warn!(
                        "Post {} matched but owner {} is missing, skipped",
                        post.identifier,
                        post.user_id
                    );
                    None
                }
            })
            .collect();

        Ok(matched)
    }
}
