//! 图表聚合服务
//!
//! 将按日期升序的价格序列重采样为展示点，
//! 以序列最后一个点的日期为锚定：
//! - 1W/1M：窗口内原始点直出，不分桶
//! - 1Y：按周分桶，桶键为该点之后最近的周五（含当天）
//! - 5Y（默认）：按自然月分桶
//!
//! 同一桶内升序遍历时最后出现的点胜出，
//! 输出按桶键升序排列

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::models::{ChartPoint, PricePoint};

/// 图表时间范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    Week1,
    Month1,
    Year1,
    Year5,
}

impl ChartRange {
    /// 解析范围参数，大小写不敏感，无法识别时按 5Y 处理
    pub fn parse(range: &str) -> Self {
        match range.to_ascii_uppercase().as_str() {
            "1W" => ChartRange::Week1,
            "1M" => ChartRange::Month1,
            "1Y" => ChartRange::Year1,
            _ => ChartRange::Year5,
        }
    }
}

/// 按范围聚合价格序列
///
/// 空输入输出空序列；日期无法解析的点跳过；
/// 非数值收盘价退化为 0.0，不中断整体聚合
pub fn aggregate_by_range(points: &[PricePoint], range: ChartRange) -> Vec<ChartPoint> {
    let latest = match points.last().and_then(|p| parse_date(&p.date)) {
        Some(date) => date,
        None => return Vec::new(),
    };

    match range {
        ChartRange::Week1 => window_points(points, latest - Duration::days(7)),
        ChartRange::Month1 => window_points(points, latest - Months::new(1)),
        ChartRange::Year1 => {
            bucket_points(points, Some(latest - Months::new(12)), next_or_same_friday)
        }
        ChartRange::Year5 => bucket_points(points, None, month_start),
    }
}

/// 窗口模式：保留日期不早于 cutoff 的原始点，保持输入顺序
fn window_points(points: &[PricePoint], cutoff: NaiveDate) -> Vec<ChartPoint> {
    points
        .iter()
        .filter(|p| matches!(parse_date(&p.date), Some(d) if d >= cutoff))
        .map(|p| ChartPoint {
            time: p.date.clone(),
            value: p.close_value(),
        })
        .collect()
}

/// 分桶模式：按 key_fn 归桶，升序覆盖使桶内最后一点胜出，
/// BTreeMap 保证输出按桶键升序
fn bucket_points(
    points: &[PricePoint],
    cutoff: Option<NaiveDate>,
    key_fn: fn(NaiveDate) -> NaiveDate,
) -> Vec<ChartPoint> {
    let mut buckets: BTreeMap<NaiveDate, ChartPoint> = BTreeMap::new();

    for point in points {
        let date = match parse_date(&point.date) {
            Some(d) => d,
            None => continue,
        };
        if let Some(cutoff) = cutoff {
            if date < cutoff {
                continue;
            }
        }
        buckets.insert(
            key_fn(date),
            ChartPoint {
                time: point.date.clone(),
                value: point.close_value(),
            },
        );
    }

    buckets.into_values().collect()
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            log::debug!("忽略无法解析的日期 {}: {}", date, e);
            None
        }
    }
}

/// 该日期之后最近的周五（当天是周五则取当天）
fn next_or_same_friday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (Weekday::Fri.num_days_from_monday() + 7
        - date.weekday().num_days_from_monday())
        % 7;
    date + Duration::days(days_ahead as i64)
}

/// 自然月桶键（当月一日）
fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}
