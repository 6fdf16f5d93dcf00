//! 幂和累加 - 基于 (n, S1, S2, S3) 的矩统计
//!
//! 所有导出统计量（方差、标准差、偏度）都是 (n, S1, S2, S3) 的纯函数，
//! 一次扫描即可得到，无需再遍历原始数据。
//!
//! 注意: 幂和公式在均值远大于标准差时存在相消误差（catastrophic cancellation），
//! 这里保留幂和形式而不是 Welford 增量修正。样本方差在 n == 1、
//! 偏度在 n < 3 时没有定义，结果以 NaN / inf 的形式直接暴露给调用方。

use serde::{Deserialize, Serialize};

use super::StreamingOperator;

/// 幂和状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerSums {
    /// 数据点数量
    pub count: usize,
    /// S1 = Σx
    pub sum: f64,
    /// S2 = Σx²
    pub sum_sq: f64,
    /// S3 = Σx³
    pub sum_cube: f64,
}

impl PowerSums {
    pub fn new() -> Self {
        Self::default()
    }

    /// 对任意序列做一次折叠，f 把元素投影成实数
    pub fn from_iter_with<I, F>(seq: I, f: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> f64,
    {
        seq.into_iter().map(f).collect()
    }

    /// 增量更新
    pub fn update(&mut self, x: f64) {
        let square = x * x;
        self.count += 1;
        self.sum += x;
        self.sum_sq += square;
        self.sum_cube += square * x;
    }

    /// 合并两个状态（幂和直接相加）
    pub fn merge(&self, other: &PowerSums) -> PowerSums {
        PowerSums {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            sum_cube: self.sum_cube + other.sum_cube,
        }
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Σ(x - x̄)² = S2 - S1²/n
    pub fn sum_of_error_squared(&self) -> f64 {
        self.sum_sq - self.sum * self.sum / self.count as f64
    }

    /// 方差 (总体)
    pub fn population_variance(&self) -> f64 {
        self.sum_of_error_squared() / self.count as f64
    }

    /// 方差 (样本), n == 1 时除零
    pub fn sample_variance(&self) -> f64 {
        self.sum_of_error_squared() / (self.count as f64 - 1.0)
    }

    /// 标准差 (总体)
    pub fn population_std_dev(&self) -> f64 {
        checked_sqrt(self.population_variance())
    }

    /// 标准差 (样本)
    pub fn sample_std_dev(&self) -> f64 {
        checked_sqrt(self.sample_variance())
    }

    /// 样本偏度 (带 n/((n-1)(n-2)) 小样本修正)
    pub fn sample_skew(&self) -> f64 {
        let n = self.count as f64;
        let (s1, s2, s3) = (self.sum, self.sum_sq, self.sum_cube);

        // Σ(x - x̄)³ 展开为幂和形式
        let sum_deviation_cubed = s3 - 3.0 * s1 * s2 / n + 2.0 * s1 * s1 * s1 / n / n;
        let sample_std = ((s2 - s1 * s1 / n) / (n - 1.0)).sqrt();
        sum_deviation_cubed / sample_std.powi(3) * n / (n - 1.0) / (n - 2.0)
    }

    /// 重置状态
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn checked_sqrt(variance: f64) -> f64 {
    if variance < 0.0 {
        log::warn!(
            "negative variance {} from power-sum cancellation, std-dev is NaN",
            variance
        );
    }
    variance.sqrt()
}

impl FromIterator<f64> for PowerSums {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sums = PowerSums::new();
        sums.extend(iter);
        sums
    }
}

impl Extend<f64> for PowerSums {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl StreamingOperator for PowerSums {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, input: f64) {
        PowerSums::update(self, input);
    }

    /// 当前均值
    fn value(&self) -> f64 {
        self.mean()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        PowerSums::reset(self);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 序列函数 - 调用方提供投影 f: Item -> f64
// ═══════════════════════════════════════════════════════════════════════════

/// (S2, S1, n)
pub fn sum_of_squares<I, F>(seq: I, f: F) -> (f64, f64, usize)
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    let sums = PowerSums::from_iter_with(seq, f);
    (sums.sum_sq, sums.sum, sums.count)
}

/// (S3, S2, S1, n)
pub fn sum_of_cubes<I, F>(seq: I, f: F) -> (f64, f64, f64, usize)
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    let sums = PowerSums::from_iter_with(seq, f);
    (sums.sum_cube, sums.sum_sq, sums.sum, sums.count)
}

/// (Σ(x - x̄)², n)
pub fn sum_of_error_squared<I, F>(seq: I, f: F) -> (f64, usize)
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    let sums = PowerSums::from_iter_with(seq, f);
    (sums.sum_of_error_squared(), sums.count)
}

pub fn population_variance<I, F>(seq: I, f: F) -> f64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    PowerSums::from_iter_with(seq, f).population_variance()
}

/// 分母为 n - 1，单元素序列结果为 NaN
pub fn sample_variance<I, F>(seq: I, f: F) -> f64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    PowerSums::from_iter_with(seq, f).sample_variance()
}

pub fn population_std_dev<I, F>(seq: I, f: F) -> f64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    PowerSums::from_iter_with(seq, f).population_std_dev()
}

pub fn sample_std_dev<I, F>(seq: I, f: F) -> f64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    PowerSums::from_iter_with(seq, f).sample_std_dev()
}

/// 样本偏度，n < 3 时没有定义
pub fn sample_skew<I, F>(seq: I, f: F) -> f64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    PowerSums::from_iter_with(seq, f).sample_skew()
}

pub fn population_std_dev_f64<I: IntoIterator<Item = f64>>(seq: I) -> f64 {
    population_std_dev(seq, |x| x)
}

pub fn sample_std_dev_f64<I: IntoIterator<Item = f64>>(seq: I) -> f64 {
    sample_std_dev(seq, |x| x)
}

pub fn sample_skew_f64<I: IntoIterator<Item = f64>>(seq: I) -> f64 {
    sample_skew(seq, |x| x)
}
