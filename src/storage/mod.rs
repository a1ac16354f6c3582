//! 存储抽象
//!
//! 核心逻辑只依赖这里的查找与自增原语，
//! 不关心数据实际落在哪里

pub mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::models::{DailyPuzzle, Stock, OUTCOME_BUCKETS};

/// 游戏数据存储接口
///
/// 查找类方法用缺失（None）表达未命中，不返回错误。
/// increment_outcome 是整个系统唯一需要原子性保证的操作：
/// 实现必须把分布桶和总次数的自增做成存储层的单条不可分割操作
/// （例如 SQL 实现用单条 UPDATE 同时加两列），
/// 绝不允许在调用层读出旧值、计算后写回
pub trait GameStore: Send + Sync {
    /// 按股票代码查找（代码已规范化为大写）
    fn stock_by_ticker(&self, ticker: &str) -> Option<Stock>;

    /// 按日期查找谜题
    fn puzzle_by_date(&self, date: NaiveDate) -> Option<DailyPuzzle>;

    /// 全部股票，供元信息与筛选项接口使用
    fn all_stocks(&self) -> Vec<Stock>;

    /// 原子自增：distribution[index] 与 total_plays 同步加一
    ///
    /// 返回自增完成后的快照（分布，总次数），
    /// 保证提交者随后的读取至少反映自己这次写入；
    /// 该日期没有谜题时返回 None
    fn increment_outcome(
        &self,
        date: NaiveDate,
        index: usize,
    ) -> Option<([u64; OUTCOME_BUCKETS], u64)>;
}
