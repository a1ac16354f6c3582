//! 内存存储实现
//!
//! 用读写锁保护的内存表实现 GameStore，
//! 启动时从 JSON 种子文件加载数据。
//! 自增在写锁内一步完成，满足接口要求的原子性；
//! 多实例部署需换用共享存储实现（如数据库单条 UPDATE）

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::models::{DailyPuzzle, Stock, OUTCOME_BUCKETS};
use crate::storage::GameStore;

#[derive(Default)]
struct Tables {
    stocks: HashMap<String, Stock>,
    puzzles: HashMap<NaiveDate, DailyPuzzle>,
}

/// 内存版游戏存储
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// 从种子文件加载，文件缺失或解析失败时告警并跳过
    pub fn load<P: AsRef<Path>>(stocks_path: P, puzzles_path: P) -> Self {
        let store = Self::new();

        match read_seed::<Vec<Stock>>(stocks_path.as_ref()) {
            Ok(stocks) => {
                log::info!("加载 {} 条股票数据", stocks.len());
                for stock in stocks {
                    store.insert_stock(stock);
                }
            }
            Err(e) => log::warn!("股票种子文件加载失败: {}", e),
        }

        match read_seed::<Vec<DailyPuzzle>>(puzzles_path.as_ref()) {
            Ok(puzzles) => {
                log::info!("加载 {} 条谜题数据", puzzles.len());
                for puzzle in puzzles {
                    store.insert_puzzle(puzzle);
                }
            }
            Err(e) => log::warn!("谜题种子文件加载失败: {}", e),
        }

        store
    }

    /// 写入一条股票（键为大写代码）
    pub fn insert_stock(&self, stock: Stock) {
        let mut tables = self.tables.write().expect("storage lock poisoned");
        tables.stocks.insert(stock.ticker.to_uppercase(), stock);
    }

    /// 写入一条谜题
    pub fn insert_puzzle(&self, puzzle: DailyPuzzle) {
        let mut tables = self.tables.write().expect("storage lock poisoned");
        tables.puzzles.insert(puzzle.puzzle_date, puzzle);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read_seed<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl GameStore for MemoryStore {
    fn stock_by_ticker(&self, ticker: &str) -> Option<Stock> {
        let tables = self.tables.read().expect("storage lock poisoned");
        tables.stocks.get(ticker).cloned()
    }

    fn puzzle_by_date(&self, date: NaiveDate) -> Option<DailyPuzzle> {
        let tables = self.tables.read().expect("storage lock poisoned");
        tables.puzzles.get(&date).cloned()
    }

    fn all_stocks(&self) -> Vec<Stock> {
        let tables = self.tables.read().expect("storage lock poisoned");
        tables.stocks.values().cloned().collect()
    }

    fn increment_outcome(
        &self,
        date: NaiveDate,
        index: usize,
    ) -> Option<([u64; OUTCOME_BUCKETS], u64)> {
        if index >= OUTCOME_BUCKETS {
            return None;
        }
        // 两个计数在同一把写锁内更新，对并发提交不可分割
        let mut tables = self.tables.write().expect("storage lock poisoned");
        let puzzle = tables.puzzles.get_mut(&date)?;
        puzzle.distribution[index] += 1;
        puzzle.total_plays += 1;
        Some((puzzle.distribution, puzzle.total_plays))
    }
}
