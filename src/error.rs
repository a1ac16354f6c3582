//! 错误类型定义
//!
//! 核心计算函数本身不会失败，所有可失败路径都集中在
//! 查找与解析边界，按类别映射到 HTTP 状态码

use actix_web::HttpResponse;
use thiserror::Error;

use crate::models::ErrorBody;

/// 请求处理错误分类
#[derive(Debug, Error)]
pub enum GameError {
    /// 请求日期没有谜题
    #[error("puzzle not found")]
    NotFound,

    /// 请求字段缺失或非法
    #[error("{0}")]
    Validation(String),

    /// 猜测的股票代码无法解析（携带规范化后的代码）
    #[error("Stock not found")]
    UnknownTicker(String),

    /// 谜题引用的股票在存储中不存在，属于配置故障
    #[error("{0}")]
    DataIntegrity(String),

    /// 存储的价格历史无法解析或为空
    #[error("{0}")]
    MalformedHistory(String),
}

impl GameError {
    /// 按错误类别构造 HTTP 响应
    pub fn to_response(&self) -> HttpResponse {
        match self {
            GameError::NotFound => HttpResponse::NotFound().finish(),
            GameError::Validation(msg) => {
                HttpResponse::BadRequest().json(ErrorBody::new(msg.clone()))
            }
            GameError::UnknownTicker(ticker) => HttpResponse::BadRequest()
                .json(ErrorBody::with_ticker("Stock not found", ticker.clone())),
            GameError::DataIntegrity(msg) => {
                log::error!("数据完整性错误: {}", msg);
                HttpResponse::InternalServerError().json(ErrorBody::new(msg.clone()))
            }
            GameError::MalformedHistory(msg) => {
                log::error!("价格历史数据异常: {}", msg);
                HttpResponse::InternalServerError().json(ErrorBody::new(msg.clone()))
            }
        }
    }
}
