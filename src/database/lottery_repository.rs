use super::repository::{LotteryRepository, NewLotteryRound};
use crate::entities::lottery_round_entity::{
    self as rounds, WinnerEntry, WinnerList, WinningNumberList,
};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct SeaOrmLotteryRepository {
    pool: DatabaseConnection,
}

impl SeaOrmLotteryRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LotteryRepository for SeaOrmLotteryRepository {
    async fn insert_round(&self, round: NewLotteryRound) -> AppResult<rounds::Model> {
        let numbers = round
            .winning_numbers
            .iter()
            .map(|n| n.as_str().to_string())
            .collect();

        let model = rounds::ActiveModel {
            draw_date: Set(round.draw_date),
            winning_numbers: Set(WinningNumberList(numbers)),
            is_active: Set(true),
            winners: Set(WinnerList::default()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(model)
    }

    async fn find_round_by_id(&self, id: i64) -> AppResult<Option<rounds::Model>> {
        Ok(rounds::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn list_rounds(&self, is_active: Option<bool>) -> AppResult<Vec<rounds::Model>> {
        let mut query = rounds::Entity::find();
        if let Some(active) = is_active {
            query = query.filter(rounds::Column::IsActive.eq(active));
        }
        Ok(query
            .order_by_desc(rounds::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn commit_draw(&self, id: i64, winners: Vec<WinnerEntry>) -> AppResult<bool> {
        // 单条 UPDATE：winners 与 is_active 一起写入；where is_active = true 防止重复开奖
        let result = rounds::Entity::update_many()
            .col_expr(rounds::Column::Winners, Expr::value(WinnerList(winners)))
            .col_expr(rounds::Column::IsActive, Expr::value(false))
            .col_expr(rounds::Column::DrawnAt, Expr::value(Utc::now()))
            .filter(rounds::Column::Id.eq(id))
            .filter(rounds::Column::IsActive.eq(true))
            .exec(&self.pool)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
