use crate::middlewares::current_user;
use crate::models::*;
use crate::services::PostService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/posts",
    tag = "post",
    request_body = CreatePostRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "发帖成功，返回带编号的帖子", body = PostResponse),
        (status = 400, description = "请求参数错误", body = ApiErrorResponse),
        (status = 401, description = "未授权"),
        (status = 409, description = "编号并发冲突，可重试", body = ApiErrorResponse),
        (status = 500, description = "本小时编号已耗尽", body = ApiErrorResponse)
    )
)]
pub async fn create_post(
    service: web::Data<PostService>,
    req: HttpRequest,
    request: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match service.create_post(user.user_id, request.into_inner()).await {
        Ok(post) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": post }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "post",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取帖子列表成功")
    )
)]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PostQuery>,
) -> Result<HttpResponse> {
    match service.list_posts(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/posts/{identifier}",
    tag = "post",
    params(
        ("identifier" = String, Path, description = "帖子编号")
    ),
    responses(
        (status = 200, description = "获取帖子成功", body = PostResponse),
        (status = 404, description = "帖子不存在", body = ApiErrorResponse)
    )
)]
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_post(&path.into_inner()).await {
        Ok(post) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": post }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{identifier}",
    tag = "post",
    params(
        ("identifier" = String, Path, description = "帖子编号")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 403, description = "只能删除自己的帖子"),
        (status = 404, description = "帖子不存在", body = ApiErrorResponse)
    )
)]
pub async fn delete_post(
    service: web::Data<PostService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match service.delete_post(user.user_id, &path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn post_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .route("", web::post().to(create_post))
            .route("", web::get().to(list_posts))
            .route("/{identifier}", web::get().to(get_post))
            .route("/{identifier}", web::delete().to(delete_post)),
    );
}
