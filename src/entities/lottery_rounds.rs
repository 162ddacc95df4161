use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 开奖号码列表（JSONB，已补零为三位）
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct WinningNumberList(pub Vec<String>);

/// 中奖快照（JSONB）
/// 开奖时冻结用户与帖子的展示字段，之后用户改名或删帖都不影响历史记录
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub user_id: i64,
    pub username: String,
    pub phone: String,
    pub email: Option<String>,
    pub post_id: i64,
    pub post_identifier: String,
    pub post_title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct WinnerList(pub Vec<WinnerEntry>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lottery_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub draw_date: NaiveDate,
    #[sea_orm(column_type = "JsonBinary")]
    pub winning_numbers: WinningNumberList,
    /// 开奖前为 true，开奖成功后永久为 false
    pub is_active: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub winners: WinnerList,
    pub created_at: Option<DateTime<Utc>>,
    pub drawn_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
