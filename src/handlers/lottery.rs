use crate::models::*;
use crate::services::LotteryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/lottery/results",
    tag = "lottery",
    responses(
        (status = 200, description = "已开奖轮次及中奖名单（手机号脱敏）", body = [LotteryResultResponse])
    )
)]
pub async fn get_results(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    match service.list_results().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn lottery_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/lottery").route("/results", web::get().to(get_results)));
}
