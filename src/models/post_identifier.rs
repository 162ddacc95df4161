//! 帖子编号 `YYYY_MM_DD_HH_HEMUNG_SSS`
//!
//! 前缀为创建时间（截断到小时），后缀为 000-999 的随机三位数。
//! 开奖只看最后三位。

use crate::error::{AppError, AppResult};
use chrono::{DateTime, TimeZone};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const IDENTIFIER_TAG: &str = "HEMUNG";

/// 每小时可用的后缀数量
pub const SUFFIX_SPACE: u16 = 1000;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}_[0-9]{2}_[0-9]{2}_[0-9]{2}_HEMUNG_[0-9]{3}$")
        .expect("identifier pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostIdentifier(String);

impl PostIdentifier {
    /// `YYYY_MM_DD_HH_HEMUNG_`
    pub fn prefix_at<Tz>(at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!("{}_{}_", at.format("%Y_%m_%d_%H"), IDENTIFIER_TAG)
    }

    pub fn from_prefix(prefix: &str, suffix: u16) -> Self {
        debug_assert!(suffix < SUFFIX_SPACE);
        Self(format!("{prefix}{suffix:03}"))
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        if !IDENTIFIER_PATTERN.is_match(raw) {
            return Err(AppError::ValidationError(format!(
                "Invalid post identifier: {raw}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 末尾三位数字（构造时已保证为 ASCII）
    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - 3..]
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostIdentifier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PostIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
