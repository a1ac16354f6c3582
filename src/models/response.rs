//! API 请求与响应模型
//!
//! 每个接口的响应形状都用显式结构体表达，
//! 只在边界处序列化为 JSON

use serde::{Deserialize, Serialize};

use crate::models::PricePoint;
use crate::services::comparator::CompareStatus;

/// 统一错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误描述
    pub error: String,
    /// 出错的股票代码（仅猜测未知股票时携带）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ticker: None,
        }
    }

    pub fn with_ticker(error: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ticker: Some(ticker.into()),
        }
    }
}

/// GET /api/puzzle/today 响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayPuzzleResponse {
    /// 谜题日期（ISO 格式）
    pub puzzle_date: String,
    /// 完整价格历史，原样透传存储内容
    pub price_history: Vec<PricePoint>,
}

/// GET /api/puzzle/today/hint 查询参数
#[derive(Debug, Deserialize)]
pub struct HintQuery {
    pub level: i32,
}

/// GET /api/puzzle/today/hint 响应
///
/// 随 level 逐级揭示：≥1 板块，≥2 行业，≥3 股票代码
#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

/// GET /api/puzzle/today/chart 查询参数
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// 时间范围（1W/1M/1Y/5Y），默认 1M
    pub range: Option<String>,
}

/// 图表展示点
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChartPoint {
    /// 胜出原始点的日期字符串
    pub time: String,
    /// 对应收盘价
    pub value: f64,
}

/// GET /api/puzzle/today/chart 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub range: String,
    pub data: Vec<ChartPoint>,
}

/// GET /api/puzzle/today/answer 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub ticker: String,
    pub name: String,
}

/// POST /api/guess 请求体
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub ticker: Option<String>,
}

/// 单字段比较结果
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FieldComparison {
    /// 展示值（已格式化）
    pub value: String,
    /// 比较结论
    pub status: CompareStatus,
    /// 数值接近度 [0,1]，仅数值字段携带
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closeness: Option<f64>,
}

/// 全部被比较字段
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessComparisons {
    pub sector: FieldComparison,
    pub industry: FieldComparison,
    pub market_cap: FieldComparison,
    pub price: FieldComparison,
    pub pe_ratio: FieldComparison,
    pub dividend_yield: FieldComparison,
}

/// 被猜股票的原始属性，供前端展示
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessedStock {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<i64>,
    pub price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// POST /api/guess 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct GuessResponse {
    pub ticker: String,
    /// 是否猜中目标股票
    pub correct: bool,
    pub guess: GuessedStock,
    pub comparisons: GuessComparisons,
}

/// POST /api/stats/submit 请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSubmitRequest {
    /// 用掉的猜测次数（胜利时必须在 1..=6）
    pub guess_count: Option<u32>,
    /// 是否猜中
    pub won: Option<bool>,
}

/// POST /api/stats/submit 响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSubmitResponse {
    pub distribution: [u64; 7],
    pub total_plays: u64,
    /// 本次提交落入的桶下标
    pub your_result: usize,
    /// 同样或更差结果的玩家占比（百分数，1 位小数）
    pub percentile: f64,
    /// 胜局平均猜测次数（2 位小数）
    pub average: f64,
}

/// GET /api/stats/today 响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTodayResponse {
    pub distribution: [u64; 7],
    pub total_plays: u64,
    pub average: f64,
}

/// 股票元信息条目
#[derive(Debug, Serialize, Deserialize)]
pub struct StockMetadata {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// GET /api/stocks/metadata 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub stocks: Vec<StockMetadata>,
}

/// GET /api/stocks/filters 响应
///
/// 去重、排序、剔除空白后的板块/行业列表
#[derive(Debug, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub sectors: Vec<String>,
    pub industries: Vec<String>,
}
