//! 矩累加器模块
//!
//! 提供流式/批量的矩统计：
//! - 幂和 (power_sums): S1/S2/S3、方差、标准差、偏度
//! - 指数加权移动平均 (ewma)
//! - 增量均值 (mean)
//! - 前缀累加 (accumulate)
//! - Bootstrap 重采样 (bootstrap)

pub mod accumulate;
pub mod bootstrap;
pub mod ewma;
pub mod mean;
pub mod power_sums;

pub use accumulate::*;
pub use bootstrap::*;
pub use ewma::*;
pub use mean::*;
pub use power_sums::*;

/// 流式算子 Trait
///
/// 设计原则:
/// 1. 状态封装: 每个算子管理自己的增量状态
/// 2. O(1) 更新: 每个输入只处理一次
/// 3. 不可回退: 算子只前向消费输入
pub trait StreamingOperator {
    /// 输入类型
    type Input;

    /// 输出类型
    type Output;

    /// 增量更新
    fn update(&mut self, input: Self::Input);

    /// 获取当前值
    fn value(&self) -> Self::Output;

    /// 已处理的数据点数量
    fn count(&self) -> usize;

    /// 重置状态
    fn reset(&mut self);

    /// 依次喂入整个序列
    fn extend_from<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Self::Input>,
        Self: Sized,
    {
        for input in inputs {
            self.update(input);
        }
    }
}
