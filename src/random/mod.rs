//! 随机数源抽象
//!
//! 随机化选择、Bootstrap 和蒙特卡洛工具都通过 [`RandomSource`] 消费随机数，
//! 调用方可以注入固定种子的实例以获得可复现的序列。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机数源
pub trait RandomSource {
    /// [0, 1) 上的均匀浮点数
    fn next_f64(&mut self) -> f64;

    /// [low, high] 上的均匀整数（闭区间）
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..=high)
    }
}

/// 默认随机数源；给定种子时可复现，否则从系统熵初始化
pub fn default_random_source(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// 无限均匀浮点序列
#[derive(Debug)]
pub struct Doubles<R> {
    rng: R,
}

/// 把随机数源包装成无限的 [0, 1) 序列，配合 `take(n)` 使用
pub fn doubles<R: RandomSource>(rng: R) -> Doubles<R> {
    Doubles { rng }
}

impl<R: RandomSource> Iterator for Doubles<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.rng.next_f64())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
