//! 结果统计服务
//!
//! 从每日 7 桶结果分布推导汇总指标。
//! 分布的自增发生在存储层（单条原子操作，见 storage 模块），
//! 这里只做纯函数推导

use crate::error::GameError;
use crate::models::{GIVE_UP_INDEX, OUTCOME_BUCKETS};

/// 由提交内容计算结果桶下标
///
/// 胜利时 guess_count 必须在 1..=6，对应桶 guess_count-1；
/// 失败统一落入放弃桶。字段缺失或越界按 Validation 处理
pub fn outcome_index(guess_count: Option<u32>, won: Option<bool>) -> Result<usize, GameError> {
    let won = won.ok_or_else(|| GameError::Validation("won is required".to_string()))?;
    let guess_count = guess_count
        .ok_or_else(|| GameError::Validation("guessCount is required".to_string()))?;

    if won {
        if !(1..=6).contains(&guess_count) {
            return Err(GameError::Validation(
                "guessCount must be between 1 and 6 when won".to_string(),
            ));
        }
        Ok(guess_count as usize - 1)
    } else {
        Ok(GIVE_UP_INDEX)
    }
}

/// 胜局平均猜测次数，放弃桶完全排除在分子分母之外
///
/// 无胜局时为 0，保留两位小数
pub fn average(distribution: &[u64; OUTCOME_BUCKETS]) -> f64 {
    let wins: u64 = distribution[..GIVE_UP_INDEX].iter().sum();
    if wins == 0 {
        return 0.0;
    }
    let weighted: u64 = distribution[..GIVE_UP_INDEX]
        .iter()
        .enumerate()
        .map(|(i, &count)| count * (i as u64 + 1))
        .sum();
    round2(weighted as f64 / wins as f64)
}

/// 同样或更差结果的玩家占比（百分数）
///
/// 统计落入 index..=6 桶的份额，含提交者自身所在桶；
/// 总数为 0 时为 0，保留一位小数
pub fn percentile(
    distribution: &[u64; OUTCOME_BUCKETS],
    total_plays: u64,
    index: usize,
) -> f64 {
    if total_plays == 0 {
        return 0.0;
    }
    let same_or_worse: u64 = distribution[index.min(GIVE_UP_INDEX)..].iter().sum();
    round1(100.0 * same_or_worse as f64 / total_plays as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
