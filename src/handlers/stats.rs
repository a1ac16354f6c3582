//! 统计接口处理器
//!
//! - POST /api/stats/submit - 提交最终结果并返回统计快照
//! - GET /api/stats/today - 今日汇总统计

use actix_web::{web, HttpResponse, Result};

use crate::handlers::AppState;
use crate::models::StatsSubmitRequest;
use crate::services::game_service;

pub async fn submit_result(
    state: web::Data<AppState>,
    body: web::Json<StatsSubmitRequest>,
) -> Result<HttpResponse> {
    match game_service::submit_result(state.store.as_ref(), state.today(), body.into_inner()) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn today_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    match game_service::today_stats(state.store.as_ref(), state.today()) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stats")
            .route("/submit", web::post().to(submit_result))
            .route("/today", web::get().to(today_stats)),
    );
}
