//! 业务逻辑服务模块
//!
//! 三个核心计算（比较、聚合、统计）都是纯函数，
//! 编排逻辑集中在 game_service

pub mod chart;        // 图表聚合
pub mod comparator;   // 猜测比较
pub mod game_service; // 请求编排
pub mod stats;        // 结果统计
