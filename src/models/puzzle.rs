//! 每日谜题数据模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 结果分布的桶数：0..=5 表示第 i+1 次猜中，6 表示放弃
pub const OUTCOME_BUCKETS: usize = 7;

/// 放弃对应的桶下标
pub const GIVE_UP_INDEX: usize = 6;

/// 每日谜题
///
/// 以日期为唯一键，每天一条，由外部进程创建。
/// 价格历史以序列化 JSON 字符串存储（对应原始表的 jsonb 列），
/// 统计字段只通过存储层的原子自增操作变化
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DailyPuzzle {
    /// 谜题日期
    pub puzzle_date: NaiveDate,
    /// 目标股票代码
    pub ticker: String,
    /// 价格历史（JSON 数组字符串，元素为 PricePoint）
    pub price_history: String,
    /// 结果分布（7 个桶）
    #[serde(default)]
    pub distribution: [u64; OUTCOME_BUCKETS],
    /// 总提交次数，不变式：等于 distribution 各桶之和
    #[serde(default)]
    pub total_plays: u64,
}
