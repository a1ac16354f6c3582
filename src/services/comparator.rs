//! 猜测比较服务
//!
//! 对猜测股票与目标股票逐字段比较，全部为纯函数：
//! - 分类字段（板块/行业）：大小写不敏感的相等判断
//! - 数值字段（市值/价格）：缺失按 0 处理，带容差比较
//! - 可空数值字段（市盈率/股息率）：缺失表示"不适用"，单侧缺失判 wrong
//!
//! 另外提供展示用格式化函数，响应中直接内嵌格式化结果

use serde::{Deserialize, Serialize};

use crate::models::{FieldComparison, GuessComparisons, Stock};

/// 数值比较默认容差
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// 字段比较结论
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompareStatus {
    Correct,
    Higher,
    Lower,
    Wrong,
}

/// 分类字段比较：大小写不敏感相等，任一侧缺失判 wrong
pub fn compare_categorical(guessed: Option<&str>, target: Option<&str>) -> CompareStatus {
    match (guessed, target) {
        (Some(g), Some(t)) if g.eq_ignore_ascii_case(t) => CompareStatus::Correct,
        _ => CompareStatus::Wrong,
    }
}

/// 数值字段比较：调用方已将缺失值替换为 0
pub fn compare_numeric(guessed: f64, target: f64, tolerance: f64) -> CompareStatus {
    if (guessed - target).abs() < tolerance {
        CompareStatus::Correct
    } else if guessed > target {
        CompareStatus::Higher
    } else {
        CompareStatus::Lower
    }
}

/// 可空数值字段比较：双侧缺失视为相同，单侧缺失无法比较
pub fn compare_nullable_numeric(
    guessed: Option<f64>,
    target: Option<f64>,
    tolerance: f64,
) -> CompareStatus {
    match (guessed, target) {
        (None, None) => CompareStatus::Correct,
        (Some(g), Some(t)) => compare_numeric(g, t, tolerance),
        _ => CompareStatus::Wrong,
    }
}

/// 数值接近度，对称，取值 [0,1]
///
/// 双零为 1.0，单零为 0.0，其余取绝对值之比；
/// 除法出现非有限结果时退化为 0.0
pub fn closeness(guessed: f64, target: f64) -> f64 {
    if guessed == 0.0 && target == 0.0 {
        return 1.0;
    }
    if guessed == 0.0 || target == 0.0 {
        return 0.0;
    }
    let ratio = guessed.abs().min(target.abs()) / guessed.abs().max(target.abs());
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// 判断整次猜测是否命中目标（股票代码大小写不敏感）
pub fn is_correct_guess(guessed_ticker: &str, target_ticker: &str) -> bool {
    guessed_ticker.eq_ignore_ascii_case(target_ticker)
}

/// 市值格式化：万亿/十亿/百万取最大适用档位，两位小数
pub fn format_market_cap(market_cap: Option<i64>) -> String {
    let cap = match market_cap {
        None | Some(0) => return "N/A".to_string(),
        Some(c) => c,
    };
    if cap >= 1_000_000_000_000 {
        format!("{:.2}T", cap as f64 / 1_000_000_000_000.0)
    } else if cap >= 1_000_000_000 {
        format!("{:.2}B", cap as f64 / 1_000_000_000.0)
    } else if cap >= 1_000_000 {
        format!("{:.2}M", cap as f64 / 1_000_000.0)
    } else {
        cap.to_string()
    }
}

/// 价格格式化：美式千分位货币，两位小数
pub fn format_price(price: Option<f64>) -> String {
    match price {
        None => "N/A".to_string(),
        Some(p) if p == 0.0 => "N/A".to_string(),
        Some(p) => format_currency(p),
    }
}

/// 市盈率格式化：两位小数加 x 后缀
pub fn format_pe_ratio(pe: Option<f64>) -> String {
    match pe {
        None => "N/A".to_string(),
        Some(p) => format!("{:.2}x", p),
    }
}

/// 股息率格式化：存储值除以 100 后按百分数输出
pub fn format_dividend_yield(dividend: Option<f64>) -> String {
    match dividend {
        None => "N/A".to_string(),
        Some(d) => format!("{:.2}%", d / 100.0),
    }
}

/// 美元货币格式化，整数部分按三位分组
fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{}", grouped, dec_part)
    } else {
        format!("${}.{}", grouped, dec_part)
    }
}

/// 组装全部被比较字段
///
/// 字段口径与响应契约一致：
/// - 板块/行业：分类比较，缺失值展示为 Unknown
/// - 市值/价格：缺失按 0 的数值比较，附带接近度
/// - 市盈率：可空数值比较，接近度按 0 替换计算
/// - 股息率：可空数值比较，不附带接近度
pub fn build_comparisons(guess: &Stock, target: &Stock) -> GuessComparisons {
    let guess_cap = guess.market_cap.unwrap_or(0) as f64;
    let target_cap = target.market_cap.unwrap_or(0) as f64;
    let guess_price = guess.current_price.unwrap_or(0.0);
    let target_price = target.current_price.unwrap_or(0.0);

    GuessComparisons {
        sector: FieldComparison {
            value: guess.sector.clone().unwrap_or_else(|| "Unknown".to_string()),
            status: compare_categorical(guess.sector.as_deref(), target.sector.as_deref()),
            closeness: None,
        },
        industry: FieldComparison {
            value: guess
                .industry
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            status: compare_categorical(guess.industry.as_deref(), target.industry.as_deref()),
            closeness: None,
        },
        market_cap: FieldComparison {
            value: format_market_cap(guess.market_cap),
            status: compare_numeric(guess_cap, target_cap, DEFAULT_TOLERANCE),
            closeness: Some(closeness(guess_cap, target_cap)),
        },
        price: FieldComparison {
            value: format_price(guess.current_price),
            status: compare_numeric(guess_price, target_price, DEFAULT_TOLERANCE),
            closeness: Some(closeness(guess_price, target_price)),
        },
        pe_ratio: FieldComparison {
            value: format_pe_ratio(guess.pe_ratio),
            status: compare_nullable_numeric(guess.pe_ratio, target.pe_ratio, DEFAULT_TOLERANCE),
            closeness: Some(closeness(
                guess.pe_ratio.unwrap_or(0.0),
                target.pe_ratio.unwrap_or(0.0),
            )),
        },
        dividend_yield: FieldComparison {
            value: format_dividend_yield(guess.dividend_yield),
            status: compare_nullable_numeric(
                guess.dividend_yield,
                target.dividend_yield,
                DEFAULT_TOLERANCE,
            ),
            closeness: None,
        },
    }
}
