use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::post::create_post,
        handlers::post::list_posts,
        handlers::post::get_post,
        handlers::post::delete_post,
        handlers::lottery::get_results,
        handlers::admin::create_round,
        handlers::admin::list_rounds,
        handlers::admin::get_round,
        handlers::admin::draw_round,
    ),
    components(
        schemas(
            CreatePostRequest,
            PostResponse,
            PostQuery,
            PaginationParams,
            CreateLotteryRoundRequest,
            LotteryRoundResponse,
            WinnerResponse,
            DrawResultResponse,
            PublicWinnerResponse,
            LotteryResultResponse,
            ApiErrorResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "post", description = "Post API"),
        (name = "lottery", description = "Public lottery results API"),
        (name = "admin", description = "Lottery administration API"),
    ),
    info(
        title = "HEMUNG Backend API",
        version = "1.0.0",
        description = "Posts with lottery identifiers and the admin draw console",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
