use sea_orm_migration::prelude::*;

/// Lottery rounds (开奖轮次)
/// - winning_numbers: JSON 数组，三位数字字符串
/// - winners: 开奖时一次性写入的中奖快照
#[derive(DeriveIden)]
enum LotteryRounds {
    Table,
    Id,
    DrawDate,
    WinningNumbers,
    IsActive,
    Winners,
    CreatedAt,
    DrawnAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LotteryRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LotteryRounds::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LotteryRounds::DrawDate).date().not_null())
                    .col(
                        ColumnDef::new(LotteryRounds::WinningNumbers)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LotteryRounds::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(LotteryRounds::Winners)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(LotteryRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(LotteryRounds::DrawnAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lottery_rounds_is_active")
                    .table(LotteryRounds::Table)
                    .col(LotteryRounds::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(LotteryRounds::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
