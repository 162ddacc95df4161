use crate::entities::post_entity;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_TITLE_CHARS: usize = 100;
const MAX_CONTENT_CHARS: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "오늘의 이야기")]
    pub title: String,
    pub content: String,
    /// 已上传图片的地址（上传由对象存储负责）
    pub image_url: Option<String>,
}

impl CreatePostRequest {
    /// 校验并返回去除首尾空白后的标题
    pub fn validate(&self) -> AppResult<String> {
        let title = self.title.trim();
        if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::ValidationError(format!(
                "Title length must be between 1 and {MAX_TITLE_CHARS} characters"
            )));
        }
        if self.content.trim().is_empty() || self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::ValidationError(format!(
                "Content length must be between 1 and {MAX_CONTENT_CHARS} characters"
            )));
        }
        Ok(title.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    #[schema(example = "2024_03_07_09_HEMUNG_045")]
    pub identifier: String,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<post_entity::Model> for PostResponse {
    fn from(m: post_entity::Model) -> Self {
        Self {
            id: m.id,
            identifier: m.identifier,
            user_id: m.user_id,
            title: m.title,
            content: m.content,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: content.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_validate_trims_title() {
        assert_eq!(request("  hi  ", "body").validate().unwrap(), "hi");
    }

    #[test]
    fn test_validate_rejects_empty_or_long_fields() {
        assert!(request("   ", "body").validate().is_err());
        assert!(request("t", " \n").validate().is_err());
        assert!(request(&"가".repeat(101), "body").validate().is_err());
        assert!(request(&"가".repeat(100), "body").validate().is_ok());
    }
}
