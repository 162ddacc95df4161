use crate::database::{LotteryRepository, NewLotteryRound, PostRepository};
use crate::entities::lottery_round_entity::WinnerEntry;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::with_timeout;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct LotteryService {
    rounds: Arc<dyn LotteryRepository>,
    posts: Arc<dyn PostRepository>,
    operation_timeout: Duration,
}

impl LotteryService {
    pub fn new(
        rounds: Arc<dyn LotteryRepository>,
        posts: Arc<dyn PostRepository>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            rounds,
            posts,
            operation_timeout,
        }
    }

    /// 创建开奖轮次（管理员）
    pub async fn create_round(
        &self,
        request: CreateLotteryRoundRequest,
    ) -> AppResult<LotteryRoundResponse> {
        let draw_date = request.parse_draw_date()?;
        if request.winning_numbers.is_empty() {
            return Err(AppError::ValidationError(
                "At least one winning number is required".to_string(),
            ));
        }
        let winning_numbers = WinningNumber::normalize_all(&request.winning_numbers)?;

        let round = self
            .rounds
            .insert_round(NewLotteryRound {
                draw_date,
                winning_numbers,
            })
            .await?;
        log::info!(
            "Lottery round {} created for {} with numbers {:?}",
            round.id,
            round.draw_date,
            round.winning_numbers.0
        );
        Ok(round.into())
    }

    pub async fn list_rounds(&self) -> AppResult<Vec<LotteryRoundResponse>> {
        let rounds = self.rounds.list_rounds(None).await?;
        Ok(rounds.into_iter().map(Into::into).collect())
    }

    pub async fn get_round(&self, id: i64) -> AppResult<LotteryRoundResponse> {
        self.rounds
            .find_round_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Lottery round {id} not found")))
    }

    /// 已开奖轮次（公开展示）
    pub async fn list_results(&self) -> AppResult<Vec<LotteryResultResponse>> {
        let rounds = self.rounds.list_rounds(Some(false)).await?;
        Ok(rounds.into_iter().map(Into::into).collect())
    }

    /// 开奖
    ///
    /// 1. 轮次不存在 -> NotFound；已开奖 -> AlreadyDrawn（不做幂等处理）
    /// 2. 号码补零为三位，一次查询取出末三位命中任一号码的帖子（并集）
    /// 3. 每个命中帖子生成一条中奖记录，同一用户多帖命中则有多条
    /// 4. 中奖名单与 is_active = false 在同一条 UPDATE 中写入；
    ///    若写入时轮次已不再 active（并发开奖），返回 AlreadyDrawn，名单保持第一次的结果
    pub async fn draw_round(&self, id: i64) -> AppResult<DrawResultResponse> {
        // 超时只覆盖读取与匹配，提交不受其约束
        let winners = with_timeout(self.operation_timeout, "draw lottery round", async {
            let round = self
                .rounds
                .find_round_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Lottery round {id} not found")))?;

            if !round.is_active {
                return Err(AppError::AlreadyDrawn(id));
            }

            let numbers = WinningNumber::normalize_all(&round.winning_numbers.0)?;
            let winners: Vec<WinnerEntry> = self
                .posts
                .find_posts_matching_trailing_digits(&numbers)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok::<_, AppError>(winners)
        })
        .await?;

        if !self.rounds.commit_draw(id, winners.clone()).await? {
            log::warn!("Lottery round {id} was drawn concurrently, result discarded");
            return Err(AppError::AlreadyDrawn(id));
        }

        log::info!("Lottery round {id} drawn with {} winner(s)", winners.len());
        Ok(DrawResultResponse::new(id, winners))
    }
}
