//! 游戏编排服务
//!
//! 负责解析"今日谜题"、调用比较/聚合/统计纯函数，
//! 并组装响应结构。所有可失败路径都集中在这里的
//! 查找与解析边界上

use chrono::NaiveDate;

use crate::error::GameError;
use crate::models::{
    AnswerResponse, ChartResponse, DailyPuzzle, FiltersResponse, GuessRequest, GuessResponse,
    GuessedStock, HintResponse, MetadataResponse, PricePoint, StatsSubmitRequest,
    StatsSubmitResponse, StatsTodayResponse, Stock, StockMetadata, TodayPuzzleResponse,
};
use crate::services::chart::{aggregate_by_range, ChartRange};
use crate::services::comparator::{build_comparisons, is_correct_guess};
use crate::services::stats;
use crate::storage::GameStore;

/// 图表范围参数默认值
const DEFAULT_CHART_RANGE: &str = "1M";

/// 解析存储的价格历史，失败或为空按服务端数据故障处理
fn parse_history(puzzle: &DailyPuzzle) -> Result<Vec<PricePoint>, GameError> {
    let history: Vec<PricePoint> = serde_json::from_str(&puzzle.price_history)
        .map_err(|_| GameError::MalformedHistory("Failed to parse price history".to_string()))?;
    if history.is_empty() {
        return Err(GameError::MalformedHistory(
            "No price history available".to_string(),
        ));
    }
    Ok(history)
}

/// 解析今日谜题对应的目标股票，缺失属于配置故障
fn target_stock(store: &dyn GameStore, puzzle: &DailyPuzzle) -> Result<Stock, GameError> {
    store
        .stock_by_ticker(&puzzle.ticker)
        .ok_or_else(|| GameError::DataIntegrity("puzzle stock not found".to_string()))
}

/// 今日谜题：日期加完整价格历史
pub fn today_puzzle(
    store: &dyn GameStore,
    today: NaiveDate,
) -> Result<TodayPuzzleResponse, GameError> {
    let puzzle = store.puzzle_by_date(today).ok_or(GameError::NotFound)?;
    let history = parse_history(&puzzle)?;
    Ok(TodayPuzzleResponse {
        puzzle_date: today.to_string(),
        price_history: history,
    })
}

/// 分级提示：≥1 板块，≥2 行业，≥3 股票代码
pub fn hint(store: &dyn GameStore, today: NaiveDate, level: i32) -> Result<HintResponse, GameError> {
    let puzzle = store.puzzle_by_date(today).ok_or(GameError::NotFound)?;
    let stock = target_stock(store, &puzzle)?;

    Ok(HintResponse {
        level,
        sector: if level >= 1 { stock.sector.clone() } else { None },
        industry: if level >= 2 { stock.industry.clone() } else { None },
        ticker: if level >= 3 { Some(stock.ticker) } else { None },
    })
}

/// 今日图表：按范围聚合价格历史
pub fn chart(
    store: &dyn GameStore,
    today: NaiveDate,
    range: Option<String>,
) -> Result<ChartResponse, GameError> {
    let puzzle = store.puzzle_by_date(today).ok_or(GameError::NotFound)?;
    let history = parse_history(&puzzle)?;

    let range = range.unwrap_or_else(|| DEFAULT_CHART_RANGE.to_string());
    let data = aggregate_by_range(&history, ChartRange::parse(&range));
    Ok(ChartResponse { range, data })
}

/// 今日答案：游戏结束后前端用来展示目标股票
pub fn answer(store: &dyn GameStore, today: NaiveDate) -> Result<AnswerResponse, GameError> {
    let puzzle = store.puzzle_by_date(today).ok_or(GameError::NotFound)?;
    let stock = target_stock(store, &puzzle)?;
    Ok(AnswerResponse {
        ticker: stock.ticker,
        name: stock.company_name,
    })
}

/// 提交一次猜测，返回逐字段比较结果
pub fn submit_guess(
    store: &dyn GameStore,
    today: NaiveDate,
    request: GuessRequest,
) -> Result<GuessResponse, GameError> {
    let ticker = request
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GameError::Validation("ticker is required".to_string()))?
        .to_uppercase();

    let puzzle = store
        .puzzle_by_date(today)
        .ok_or_else(|| GameError::Validation("no puzzle loaded for today".to_string()))?;
    let target = target_stock(store, &puzzle)?;

    let guess = store
        .stock_by_ticker(&ticker)
        .ok_or(GameError::UnknownTicker(ticker))?;

    let correct = is_correct_guess(&guess.ticker, &target.ticker);
    let comparisons = build_comparisons(&guess, &target);

    Ok(GuessResponse {
        ticker: guess.ticker.clone(),
        correct,
        guess: GuessedStock {
            ticker: guess.ticker,
            name: guess.company_name,
            sector: guess.sector,
            industry: guess.industry,
            market_cap: guess.market_cap,
            price: guess.current_price,
            pe_ratio: guess.pe_ratio,
            dividend_yield: guess.dividend_yield,
        },
        comparisons,
    })
}

/// 提交最终结果，原子计入分布后返回统计快照
pub fn submit_result(
    store: &dyn GameStore,
    today: NaiveDate,
    request: StatsSubmitRequest,
) -> Result<StatsSubmitResponse, GameError> {
    let index = stats::outcome_index(request.guess_count, request.won)?;

    let (distribution, total_plays) = store
        .increment_outcome(today, index)
        .ok_or(GameError::NotFound)?;

    Ok(StatsSubmitResponse {
        distribution,
        total_plays,
        your_result: index,
        percentile: stats::percentile(&distribution, total_plays, index),
        average: stats::average(&distribution),
    })
}

/// 今日汇总统计
pub fn today_stats(
    store: &dyn GameStore,
    today: NaiveDate,
) -> Result<StatsTodayResponse, GameError> {
    let puzzle = store.puzzle_by_date(today).ok_or(GameError::NotFound)?;
    Ok(StatsTodayResponse {
        average: stats::average(&puzzle.distribution),
        distribution: puzzle.distribution,
        total_plays: puzzle.total_plays,
    })
}

/// 全部股票元信息，按代码排序保证输出稳定
pub fn metadata(store: &dyn GameStore) -> MetadataResponse {
    let mut stocks: Vec<StockMetadata> = store
        .all_stocks()
        .into_iter()
        .map(|s| StockMetadata {
            ticker: s.ticker,
            name: s.company_name,
            sector: s.sector,
            industry: s.industry,
        })
        .collect();
    stocks.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    MetadataResponse { stocks }
}

/// 板块/行业筛选项：去重、排序、剔除空白
pub fn filters(store: &dyn GameStore) -> FiltersResponse {
    use std::collections::BTreeSet;

    let mut sectors = BTreeSet::new();
    let mut industries = BTreeSet::new();
    for stock in store.all_stocks() {
        if let Some(sector) = stock.sector.filter(|s| !s.trim().is_empty()) {
            sectors.insert(sector);
        }
        if let Some(industry) = stock.industry.filter(|s| !s.trim().is_empty()) {
            industries.insert(industry);
        }
    }

    FiltersResponse {
        sectors: sectors.into_iter().collect(),
        industries: industries.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyPuzzle, OUTCOME_BUCKETS};
    use crate::services::comparator::CompareStatus;
    use crate::storage::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn history_json() -> String {
        r#"[
            {"date": "2024-06-10", "open": 100.0, "close": 101.5, "volume": 1000},
            {"date": "2024-06-11", "open": 101.5, "close": 102.0, "volume": 1100},
            {"date": "2024-06-14", "open": 102.0, "close": 99.25, "volume": 900}
        ]"#
        .to_string()
    }

    fn fixture_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_stock(Stock {
            ticker: "MSFT".to_string(),
            company_name: "Microsoft Corporation".to_string(),
            sector: Some("Technology".to_string()),
            industry: Some("Software - Infrastructure".to_string()),
            market_cap: Some(3_200_000_000_000),
            current_price: Some(440.0),
            pe_ratio: Some(36.0),
            dividend_yield: Some(72.0),
        });
        store.insert_stock(Stock {
            ticker: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            sector: Some("Technology".to_string()),
            industry: Some("Consumer Electronics".to_string()),
            market_cap: Some(3_000_000_000_000),
            current_price: Some(195.0),
            pe_ratio: Some(30.0),
            dividend_yield: Some(44.0),
        });
        store.insert_puzzle(DailyPuzzle {
            puzzle_date: today(),
            ticker: "MSFT".to_string(),
            price_history: history_json(),
            distribution: [0; OUTCOME_BUCKETS],
            total_plays: 0,
        });
        store
    }

    /// 测试今日谜题响应回传完整历史
    #[test]
    fn test_today_puzzle() {
        let store = fixture_store();
        let response = today_puzzle(&store, today()).unwrap();
        assert_eq!(response.puzzle_date, "2024-06-14");
        assert_eq!(response.price_history.len(), 3);
        // 附加字段原样透传
        assert!(response.price_history[0].extra.contains_key("volume"));
    }

    /// 测试无谜题与历史损坏的错误分类
    #[test]
    fn test_today_puzzle_errors() {
        let store = MemoryStore::new();
        assert!(matches!(
            today_puzzle(&store, today()),
            Err(GameError::NotFound)
        ));

        store.insert_puzzle(DailyPuzzle {
            puzzle_date: today(),
            ticker: "MSFT".to_string(),
            price_history: "not json".to_string(),
            distribution: [0; OUTCOME_BUCKETS],
            total_plays: 0,
        });
        assert!(matches!(
            today_puzzle(&store, today()),
            Err(GameError::MalformedHistory(_))
        ));

        store.insert_puzzle(DailyPuzzle {
            puzzle_date: today(),
            ticker: "MSFT".to_string(),
            price_history: "[]".to_string(),
            distribution: [0; OUTCOME_BUCKETS],
            total_plays: 0,
        });
        assert!(matches!(
            today_puzzle(&store, today()),
            Err(GameError::MalformedHistory(_))
        ));
    }

    /// 测试提示逐级揭示
    #[test]
    fn test_hint_levels() {
        let store = fixture_store();

        let h0 = hint(&store, today(), 0).unwrap();
        assert!(h0.sector.is_none() && h0.industry.is_none() && h0.ticker.is_none());

        let h1 = hint(&store, today(), 1).unwrap();
        assert_eq!(h1.sector.as_deref(), Some("Technology"));
        assert!(h1.industry.is_none());

        let h3 = hint(&store, today(), 3).unwrap();
        assert_eq!(h3.ticker.as_deref(), Some("MSFT"));
        assert_eq!(h3.industry.as_deref(), Some("Software - Infrastructure"));
    }

    /// 测试谜题引用缺失股票时的服务端错误
    #[test]
    fn test_hint_data_integrity() {
        let store = MemoryStore::new();
        store.insert_puzzle(DailyPuzzle {
            puzzle_date: today(),
            ticker: "GONE".to_string(),
            price_history: history_json(),
            distribution: [0; OUTCOME_BUCKETS],
            total_plays: 0,
        });
        assert!(matches!(
            hint(&store, today(), 1),
            Err(GameError::DataIntegrity(_))
        ));
    }

    /// 测试图表默认范围与回显
    #[test]
    fn test_chart_default_range() {
        let store = fixture_store();
        let response = chart(&store, today(), None).unwrap();
        assert_eq!(response.range, "1M");
        assert_eq!(response.data.len(), 3);

        let response = chart(&store, today(), Some("1w".to_string())).unwrap();
        assert_eq!(response.range, "1w");
        assert_eq!(response.data.len(), 3);
    }

    /// 测试答案接口
    #[test]
    fn test_answer() {
        let store = fixture_store();
        let response = answer(&store, today()).unwrap();
        assert_eq!(response.ticker, "MSFT");
        assert_eq!(response.name, "Microsoft Corporation");
    }

    /// 端到端：AAPL 猜 MSFT，板块相同判 correct，行业不同判 wrong
    #[test]
    fn test_submit_guess_comparisons() {
        let store = fixture_store();
        let response = submit_guess(
            &store,
            today(),
            GuessRequest {
                ticker: Some("aapl".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response.ticker, "AAPL");
        assert!(!response.correct);
        assert_eq!(response.comparisons.sector.status, CompareStatus::Correct);
        assert_eq!(response.comparisons.industry.status, CompareStatus::Wrong);
        assert_eq!(response.comparisons.market_cap.status, CompareStatus::Lower);
        assert_eq!(response.guess.name, "Apple Inc.");
    }

    /// 测试猜中目标
    #[test]
    fn test_submit_guess_correct() {
        let store = fixture_store();
        let response = submit_guess(
            &store,
            today(),
            GuessRequest {
                ticker: Some(" msft ".to_string()),
            },
        )
        .unwrap();
        assert!(response.correct);
        assert_eq!(response.comparisons.price.closeness, Some(1.0));
    }

    /// 测试猜测请求的各类失败
    #[test]
    fn test_submit_guess_errors() {
        let store = fixture_store();

        assert!(matches!(
            submit_guess(&store, today(), GuessRequest { ticker: None }),
            Err(GameError::Validation(_))
        ));
        assert!(matches!(
            submit_guess(
                &store,
                today(),
                GuessRequest {
                    ticker: Some("  ".to_string())
                }
            ),
            Err(GameError::Validation(_))
        ));

        // 未知代码按规范化后的形式回传
        match submit_guess(
            &store,
            today(),
            GuessRequest {
                ticker: Some("zzzz".to_string()),
            },
        ) {
            Err(GameError::UnknownTicker(t)) => assert_eq!(t, "ZZZZ"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }

        // 当天没有谜题时按客户端错误处理
        let empty = MemoryStore::new();
        assert!(matches!(
            submit_guess(
                &empty,
                today(),
                GuessRequest {
                    ticker: Some("AAPL".to_string())
                }
            ),
            Err(GameError::Validation(_))
        ));
    }

    /// 测试结果提交：计入分布并返回含本次写入的统计
    #[test]
    fn test_submit_result() {
        let store = fixture_store();

        let response = submit_result(
            &store,
            today(),
            StatsSubmitRequest {
                guess_count: Some(3),
                won: Some(true),
            },
        )
        .unwrap();

        assert_eq!(response.your_result, 2);
        assert_eq!(response.total_plays, 1);
        assert_eq!(response.distribution[2], 1);
        assert_eq!(response.percentile, 100.0);
        assert_eq!(response.average, 3.0);

        // 放弃提交落入第 7 桶
        let response = submit_result(
            &store,
            today(),
            StatsSubmitRequest {
                guess_count: Some(6),
                won: Some(false),
            },
        )
        .unwrap();
        assert_eq!(response.your_result, 6);
        assert_eq!(response.total_plays, 2);
        // 放弃桶不影响平均值
        assert_eq!(response.average, 3.0);
        assert_eq!(response.percentile, 50.0);
    }

    /// 测试结果提交的校验与无谜题分支
    #[test]
    fn test_submit_result_errors() {
        let store = fixture_store();
        assert!(matches!(
            submit_result(
                &store,
                today(),
                StatsSubmitRequest {
                    guess_count: None,
                    won: Some(true)
                }
            ),
            Err(GameError::Validation(_))
        ));

        let empty = MemoryStore::new();
        assert!(matches!(
            submit_result(
                &empty,
                today(),
                StatsSubmitRequest {
                    guess_count: Some(2),
                    won: Some(true)
                }
            ),
            Err(GameError::NotFound)
        ));
    }

    /// 测试今日统计
    #[test]
    fn test_today_stats() {
        let store = fixture_store();
        store.increment_outcome(today(), 0).unwrap();
        store.increment_outcome(today(), 0).unwrap();
        store.increment_outcome(today(), 6).unwrap();

        let response = today_stats(&store, today()).unwrap();
        assert_eq!(response.total_plays, 3);
        assert_eq!(response.average, 1.0);
        assert_eq!(response.distribution[0], 2);
    }

    /// 测试元信息排序输出
    #[test]
    fn test_metadata_sorted() {
        let store = fixture_store();
        let response = metadata(&store);
        let tickers: Vec<&str> = response.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    /// 测试筛选项去重、排序、剔除空白
    #[test]
    fn test_filters() {
        let store = fixture_store();
        store.insert_stock(Stock {
            ticker: "XOM".to_string(),
            company_name: "Exxon Mobil".to_string(),
            sector: Some("Energy".to_string()),
            industry: Some("  ".to_string()),
            market_cap: None,
            current_price: None,
            pe_ratio: None,
            dividend_yield: None,
        });

        let response = filters(&store);
        assert_eq!(response.sectors, vec!["Energy", "Technology"]);
        assert_eq!(
            response.industries,
            vec!["Consumer Electronics", "Software - Infrastructure"]
        );
    }
}
