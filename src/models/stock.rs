//! 股票数据模型
//!
//! 定义股票及其历史价格点的数据结构

use serde::{Deserialize, Serialize};

/// 股票基础信息
///
/// 以 ticker（大写股票代码）作为唯一键，
/// 由外部数据进程写入，本服务只读
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// 股票代码（大写）
    pub ticker: String,
    /// 公司名称
    pub company_name: String,
    /// 所属板块（可选）
    pub sector: Option<String>,
    /// 所属行业（可选）
    pub industry: Option<String>,
    /// 市值（整数，可选，缺失按 0 比较）
    pub market_cap: Option<i64>,
    /// 当前价格（可选，缺失按 0 比较）
    pub current_price: Option<f64>,
    /// 市盈率（可选，缺失表示不适用）
    pub pe_ratio: Option<f64>,
    /// 股息率（可选，存储值为百分点 ×100，如 250 表示 2.50%）
    pub dividend_yield: Option<f64>,
}

/// 单日价格点
///
/// 历史价格序列中的一条记录，按日期升序存储。
/// 除 date 和 close 外的 OHLCV 字段原样透传，
/// 图表聚合只关心收盘价
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PricePoint {
    /// 日期（ISO 格式，如 2024-01-02）
    pub date: String,
    /// 收盘价（保留原始 JSON 值，非数值退化为 0.0）
    #[serde(default)]
    pub close: serde_json::Value,
    /// 其余字段（开盘价、成交量等），原样保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PricePoint {
    /// 读取收盘价，非数值退化为 0.0
    pub fn close_value(&self) -> f64 {
        self.close.as_f64().unwrap_or(0.0)
    }
}
