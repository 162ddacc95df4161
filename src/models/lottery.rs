use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::lottery_round_entity::{self as round_entity, WinnerEntry};
use crate::error::{AppError, AppResult};
use crate::utils::mask_phone;

use super::PostIdentifier;

/// 开奖号码：恰好三位 ASCII 数字（管理员输入不足三位时左侧补零）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WinningNumber(String);

impl WinningNumber {
    pub fn normalize(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 3 || !trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AppError::ValidationError(format!(
                "Winning number must be 1 to 3 digits, got {raw:?}"
            )));
        }
        Ok(Self(format!("{trimmed:0>3}")))
    }

    pub fn normalize_all<S: AsRef<str>>(raw: &[S]) -> AppResult<Vec<Self>> {
        raw.iter().map(|n| Self::normalize(n.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, identifier: &PostIdentifier) -> bool {
        identifier.suffix() == self.0
    }
}

/// 创建开奖轮次请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateLotteryRoundRequest {
    /// 开奖日期 YYYY-MM-DD
    #[schema(example = "2024-05-01")]
    pub draw_date: String,
    /// 中奖号码（1-3 位数字，自动补零为三位）
    #[schema(example = json!(["123", "45"]))]
    pub winning_numbers: Vec<String>,
}

impl CreateLotteryRoundRequest {
    pub fn parse_draw_date(&self) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(self.draw_date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::ValidationError("Invalid draw date format".to_string()))
    }
}

/// 中奖者（管理端，包含完整联系方式）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerResponse {
    pub user_id: i64,
    pub username: String,
    pub phone: String,
    pub email: Option<String>,
    pub post_id: i64,
    pub post_identifier: String,
    pub post_title: String,
}

impl From<WinnerEntry> for WinnerResponse {
    fn from(w: WinnerEntry) -> Self {
        Self {
            user_id: w.user_id,
            username: w.username,
            phone: w.phone,
            email: w.email,
            post_id: w.post_id,
            post_identifier: w.post_identifier,
            post_title: w.post_title,
        }
    }
}

/// 开奖轮次（管理端）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LotteryRoundResponse {
    pub id: i64,
    pub draw_date: NaiveDate,
    pub winning_numbers: Vec<String>,
    pub is_active: bool,
    pub winners: Vec<WinnerResponse>,
    pub created_at: Option<DateTime<Utc>>,
    pub drawn_at: Option<DateTime<Utc>>,
}

impl From<round_entity::Model> for LotteryRoundResponse {
    fn from(m: round_entity::Model) -> Self {
        Self {
            id: m.id,
            draw_date: m.draw_date,
            winning_numbers: m.winning_numbers.0,
            is_active: m.is_active,
            winners: m.winners.0.into_iter().map(Into::into).collect(),
            created_at: m.created_at,
            drawn_at: m.drawn_at,
        }
    }
}

/// 开奖结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResultResponse {
    pub round_id: i64,
    pub winner_count: usize,
    pub winners: Vec<WinnerResponse>,
}

impl DrawResultResponse {
    pub fn new(round_id: i64, winners: Vec<WinnerEntry>) -> Self {
        Self {
            round_id,
            winner_count: winners.len(),
            winners: winners.into_iter().map(Into::into).collect(),
        }
    }
}

/// 公开的中奖者信息（手机号脱敏，不含邮箱）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicWinnerResponse {
    pub username: String,
    #[schema(example = "*******5678")]
    pub phone: String,
    pub post_identifier: String,
    pub post_title: String,
}

impl From<WinnerEntry> for PublicWinnerResponse {
    fn from(w: WinnerEntry) -> Self {
        Self {
            username: w.username,
            phone: mask_phone(&w.phone),
            post_identifier: w.post_identifier,
            post_title: w.post_title,
        }
    }
}

/// 公开开奖结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LotteryResultResponse {
    pub id: i64,
    pub draw_date: NaiveDate,
    pub winning_numbers: Vec<String>,
    pub winners: Vec<PublicWinnerResponse>,
    pub drawn_at: Option<DateTime<Utc>>,
}

impl From<round_entity::Model> for LotteryResultResponse {
    fn from(m: round_entity::Model) -> Self {
        Self {
            id: m.id,
            draw_date: m.draw_date,
            winning_numbers: m.winning_numbers.0,
            winners: m.winners.0.into_iter().map(Into::into).collect(),
            drawn_at: m.drawn_at,
        }
    }
}
