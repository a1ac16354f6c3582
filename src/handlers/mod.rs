//! HTTP 请求处理器
//!
//! 路由挂在 /api 前缀下，处理器只做参数提取、
//! 调用服务层、按错误类别映射状态码三件事

pub mod guess;
pub mod health;
pub mod puzzle;
pub mod stats;
pub mod stock;

use actix_web::web;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::Arc;

use crate::storage::GameStore;

/// 处理器共享状态
pub struct AppState {
    /// 游戏数据存储
    pub store: Arc<dyn GameStore>,
    /// 市场时区，"今天"按此时区推导
    pub timezone: Tz,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    /// 当前市场日期
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config)
            .configure(puzzle::config)
            .configure(guess::config)
            .configure(stats::config)
            .configure(stock::config),
    );
}
