//! Stockle 后端服务
//!
//! 每日股票猜谜游戏的 RESTful API 服务：
//! 猜测比较、价格图表聚合、结果分布统计

mod config;   // 配置加载
mod error;    // 错误分类
mod handlers; // HTTP 请求处理器
mod models;   // 数据模型定义
mod services; // 业务逻辑服务
mod storage;  // 存储抽象与内存实现

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::storage::MemoryStore;

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load();

    // 初始化日志系统，默认日志级别取自配置
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    let timezone: chrono_tz::Tz = config.game.timezone.parse().unwrap_or_else(|_| {
        log::warn!("无法识别时区 {}，回退到 America/New_York", config.game.timezone);
        chrono_tz::America::New_York
    });

    let store = Arc::new(MemoryStore::load(
        &config.game.stocks_path,
        &config.game.puzzles_path,
    ));
    let state = web::Data::new(AppState::new(store, timezone));

    log::info!("启动 Stockle 后端服务，监听 {}", config.bind_addr());

    let workers = config.server.workers;
    let bind_addr = config.bind_addr();

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config) // 配置路由
    });
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(bind_addr)?.run().await
}
