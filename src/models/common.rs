use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 错误响应体 `{ "success": false, "error": { code, message } }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "ALREADY_DRAWN")]
    pub code: String,
    pub message: String,
}
