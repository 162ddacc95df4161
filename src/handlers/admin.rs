use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::LotteryService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/lottery/rounds",
    tag = "admin",
    request_body = CreateLotteryRoundRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建开奖轮次成功", body = LotteryRoundResponse),
        (status = 400, description = "日期或号码格式错误", body = ApiErrorResponse),
        (status = 403, description = "非管理员")
    )
)]
pub async fn create_round(
    service: web::Data<LotteryService>,
    req: HttpRequest,
    request: web::Json<CreateLotteryRoundRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match service.create_round(request.into_inner()).await {
        Ok(round) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": round }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/lottery/rounds",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "全部开奖轮次（倒序）", body = [LotteryRoundResponse]),
        (status = 403, description = "非管理员")
    )
)]
pub async fn list_rounds(
    service: web::Data<LotteryService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match service.list_rounds().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/lottery/rounds/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "轮次ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "轮次详情", body = LotteryRoundResponse),
        (status = 404, description = "轮次不存在", body = ApiErrorResponse)
    )
)]
pub async fn get_round(
    service: web::Data<LotteryService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match service.get_round(path.into_inner()).await {
        Ok(round) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": round }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/lottery/rounds/{id}/draw",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "轮次ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "开奖成功，返回中奖名单", body = DrawResultResponse),
        (status = 400, description = "该轮次已开奖", body = ApiErrorResponse),
        (status = 404, description = "轮次不存在", body = ApiErrorResponse)
    )
)]
/// 开奖（不可撤销，每个轮次只能执行一次）
pub async fn draw_round(
    service: web::Data<LotteryService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    let round_id = path.into_inner();
    log::info!("Admin {} drawing lottery round {round_id}", admin.user_id);
    match service.draw_round(round_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/lottery")
            .route("/rounds", web::post().to(create_round))
            .route("/rounds", web::get().to(list_rounds))
            .route("/rounds/{id}", web::get().to(get_round))
            .route("/rounds/{id}/draw", web::post().to(draw_round)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::handlers::lottery_config;
    use crate::middlewares::AuthMiddleware;
    use crate::utils::JwtService;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    fn lottery_service() -> LotteryService {
        let store = Arc::new(MemoryStore::new());
        store.add_user(1, "kim", "01011112222");
        store.add_user(2, "lee", "01033334444");
        store.add_post(1, "2024_03_07_09_HEMUNG_123");
        store.add_post(2, "2024_03_08_10_HEMUNG_045");
        store.add_post(2, "2024_03_08_11_HEMUNG_999");
        LotteryService::new(store.clone(), store, Duration::from_secs(5))
    }

    macro_rules! app {
        ($jwt:expr, $service:expr) => {
            test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new($jwt.clone()))
                    .app_data(web::Data::new($service.clone()))
                    .service(
                        web::scope("/api/v1")
                            .configure(lottery_config)
                            .configure(admin_config),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_admin_draw_flow() {
        let jwt = JwtService::new("test-secret", 300);
        let service = lottery_service();
        let app = app!(jwt, service);
        let bearer = format!("Bearer {}", jwt.issue_token(99, true).unwrap());

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/lottery/rounds")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(CreateLotteryRoundRequest {
                draw_date: "2024-05-01".into(),
                winning_numbers: vec!["123".into(), "45".into()],
            })
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/admin/lottery/rounds/{id}/draw"))
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["winner_count"], 2);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/admin/lottery/rounds/{id}/draw"))
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "ALREADY_DRAWN");

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/lottery/rounds/404/draw")
            .insert_header(("Authorization", bearer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/lottery/results")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["winners"][0]["phone"], "*******2222");
    }

    #[actix_web::test]
    async fn test_non_admin_cannot_draw() {
        let jwt = JwtService::new("test-secret", 300);
        let service = lottery_service();
        let app = app!(jwt, service);
        let bearer = format!("Bearer {}", jwt.issue_token(1, false).unwrap());

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/lottery/rounds/1/draw")
            .insert_header(("Authorization", bearer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
