//! 猜测接口处理器
//!
//! POST /api/guess - 提交一次猜测，返回逐字段比较

use actix_web::{web, HttpResponse, Result};

use crate::handlers::AppState;
use crate::models::GuessRequest;
use crate::services::game_service;

pub async fn submit_guess(
    state: web::Data<AppState>,
    body: web::Json<GuessRequest>,
) -> Result<HttpResponse> {
    match game_service::submit_guess(state.store.as_ref(), state.today(), body.into_inner()) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/guess", web::post().to(submit_guess));
}
