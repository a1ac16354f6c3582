//! 谜题接口处理器
//!
//! - GET /api/puzzle/today - 今日谜题及价格历史
//! - GET /api/puzzle/today/hint?level= - 分级提示
//! - GET /api/puzzle/today/chart?range= - 图表数据
//! - GET /api/puzzle/today/answer - 今日答案

use actix_web::{web, HttpResponse, Result};

use crate::handlers::AppState;
use crate::models::{ChartQuery, HintQuery};
use crate::services::game_service;

/// 今日谜题
pub async fn today_puzzle(state: web::Data<AppState>) -> Result<HttpResponse> {
    match game_service::today_puzzle(state.store.as_ref(), state.today()) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

/// 分级提示
pub async fn hint(state: web::Data<AppState>, query: web::Query<HintQuery>) -> Result<HttpResponse> {
    match game_service::hint(state.store.as_ref(), state.today(), query.level) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

/// 图表数据，range 缺省为 1M
pub async fn chart(
    state: web::Data<AppState>,
    query: web::Query<ChartQuery>,
) -> Result<HttpResponse> {
    match game_service::chart(state.store.as_ref(), state.today(), query.into_inner().range) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

/// 今日答案
pub async fn answer(state: web::Data<AppState>) -> Result<HttpResponse> {
    match game_service::answer(state.store.as_ref(), state.today()) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.to_response()),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/puzzle/today")
            .route("", web::get().to(today_puzzle))
            .route("/hint", web::get().to(hint))
            .route("/chart", web::get().to(chart))
            .route("/answer", web::get().to(answer)),
    );
}
