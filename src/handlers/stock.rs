//! 股票信息接口处理器
//!
//! - GET /api/stocks/metadata - 全部股票元信息
//! - GET /api/stocks/filters - 板块/行业筛选项

use actix_web::{web, HttpResponse, Result};

use crate::handlers::AppState;
use crate::services::game_service;

pub async fn metadata(state: web::Data<AppState>) -> Result<HttpResponse> {
    let response = game_service::metadata(state.store.as_ref());
    Ok(HttpResponse::Ok().json(response))
}

pub async fn filters(state: web::Data<AppState>) -> Result<HttpResponse> {
    let response = game_service::filters(state.store.as_ref());
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("/metadata", web::get().to(metadata))
            .route("/filters", web::get().to(filters)),
    );
}
