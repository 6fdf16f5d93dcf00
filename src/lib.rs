//! # QASTATS-RS
//!
//! 数值分析工具箱 - 流式统计 / 滞后缓冲 / 顺序统计量 / 经验分布
//!
//! ## 核心能力
//!
//! - **环形缓冲区**: 固定容量，写满后覆盖最旧元素 (buffer::ring_buffer)
//! - **滞后配对**: 把序列变成 (k 步之前的值, 当前值) 对 (buffer::lag)
//! - **矩累加器**: 幂和 / 均值 / 方差 / 偏度 / EWMA / Bootstrap (moments)
//! - **顺序统计量**: Lomuto 分区 + 随机化快速选择 (selection)
//! - **经验分布**: 阶梯 CDF + DKW 置信带 (distribution)
//! - **蒙特卡洛**: 线性同余序列 / 随机游走 / 朴素积分 (montecarlo)
//!
//! ## 架构设计
//!
//! ```text
//! 调用方 (序列 / 切片)
//!     ↓
//! moments  buffer::lag ─→ buffer::ring_buffer
//!     ↓
//! selection  distribution   montecarlo ─→ random
//! ```
//!
//! 所有算子单线程、同步执行；序列算子是惰性的单次迭代器。

// ============================================================================
// 内部模块
// ============================================================================

/// 环形缓冲区与滞后配对
pub mod buffer;

/// 矩累加器 (幂和 / 方差 / 偏度 / EWMA / Bootstrap)
pub mod moments;

/// 顺序统计量选择 (分区 + 快速选择)
pub mod selection;

/// 经验分布函数与置信带
pub mod distribution;

/// 随机数源抽象
pub mod random;

/// 蒙特卡洛工具
pub mod montecarlo;

/// 工具模块 (配置)
pub mod utils;

// ============================================================================
// 重导出常用类型
// ============================================================================

pub use buffer::{lag, Lag, LagExt, RingBuffer};
pub use distribution::{ConfidenceBand, EmpiricalCdf};
pub use moments::{
    accumulate, bootstrap, ewma, mean_incremental, population_std_dev, population_variance,
    sample_skew, sample_std_dev, sample_variance, sum_of_cubes, sum_of_error_squared,
    sum_of_squares, Ewma, PowerSums, RunningMean, StreamingOperator,
};
pub use random::{default_random_source, RandomSource};
pub use selection::{partition, randomized_select, randomized_select_with, select};
pub use utils::config::StatsConfig;

// ============================================================================
// 全局错误类型
// ============================================================================

/// 统计工具错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Container is empty")]
    EmptyContainer,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
