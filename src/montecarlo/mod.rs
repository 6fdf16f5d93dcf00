//! 蒙特卡洛工具
//!
//! - 朴素蒙特卡洛积分
//! - 随机游走路径 (无限惰性序列)
//! - 线性同余序列 (无限惰性序列，仅作教学用途，不要当随机数源使用)

use crate::moments::{accumulate, Accumulate};
use crate::random::{doubles, RandomSource};
use crate::{Result, StatsError};

/// 在 [a, b] 上用 n 个均匀样本估计 ∫f
pub fn naive_integrate<F, R>(n: usize, a: f64, b: f64, f: F, rng: R) -> Result<f64>
where
    F: FnMut(f64) -> f64,
    R: RandomSource,
{
    if n == 0 {
        return Err(StatsError::InvalidArgument(
            "integration needs at least one sample".to_string(),
        ));
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(StatsError::InvalidArgument(format!(
            "integration bounds must be finite, got [{}, {}]",
            a, b
        )));
    }

    let total: f64 = doubles(rng)
        .take(n)
        .map(|u| u * (b - a) + a)
        .map(f)
        .sum();
    Ok(total / n as f64 * (b - a))
}

/// 随机游走的单步增量：u <= threshold 时为 up，否则为 down
#[derive(Debug)]
pub struct WalkSteps<R> {
    rng: R,
    threshold: f64,
    up: i64,
    down: i64,
}

impl<R: RandomSource> Iterator for WalkSteps<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.rng.next_f64() <= self.threshold {
            Some(self.up)
        } else {
            Some(self.down)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// 随机游走路径: 单步增量的前缀累加
///
/// 每一步抽取 u ∈ [0, 1)，u <= threshold 时加 up，否则加 down。
/// 产出的是每一步之后的位置，起点 0 不产出。
/// 位置在 i64 边界处饱和，不会溢出。
#[derive(Debug)]
pub struct RandomWalk<R> {
    path: Accumulate<WalkSteps<R>, i64, fn(i64, i64) -> i64>,
}

impl<R: RandomSource> RandomWalk<R> {
    fn new(rng: R, threshold: f64, up: i64, down: i64) -> Self {
        let steps = WalkSteps {
            rng,
            threshold,
            up,
            down,
        };
        RandomWalk {
            path: accumulate(steps, 0, i64::saturating_add as fn(i64, i64) -> i64),
        }
    }
}

pub fn random_walk<R: RandomSource>(
    threshold: f64,
    up: i64,
    down: i64,
    rng: R,
) -> Result<RandomWalk<R>> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(StatsError::InvalidArgument(format!(
            "threshold probability must be between 0 and 1 inclusive, got {}",
            threshold
        )));
    }
    Ok(RandomWalk::new(rng, threshold, up, down))
}

/// 对称 ±1 随机游走
pub fn simple_random_walk<R: RandomSource>(rng: R) -> RandomWalk<R> {
    RandomWalk::new(rng, 0.5, 1, -1)
}

impl<R: RandomSource> Iterator for RandomWalk<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.path.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.path.size_hint()
    }
}

/// 线性同余序列 x ← (multiplier·x + increment) mod range
#[derive(Debug, Clone)]
pub struct LinearCongruent {
    state: u64,
    range: u64,
    multiplier: u64,
    increment: u64,
}

pub fn linear_congruent(
    seed: u64,
    range: u64,
    multiplier: u64,
    increment: u64,
) -> Result<LinearCongruent> {
    if range < 1 {
        return Err(StatsError::InvalidArgument(
            "range must be at least 1".to_string(),
        ));
    }
    if seed >= range {
        return Err(StatsError::InvalidArgument(format!(
            "seed must be between 0 and {} inclusive",
            range - 1
        )));
    }
    if multiplier < 1 || multiplier >= range {
        return Err(StatsError::InvalidArgument(format!(
            "multiplier must be between 1 and {} inclusive",
            range - 1
        )));
    }
    if increment >= range {
        return Err(StatsError::InvalidArgument(format!(
            "increment must be between 0 and {} inclusive",
            range - 1
        )));
    }
    Ok(LinearCongruent {
        state: seed,
        range,
        multiplier,
        increment,
    })
}

impl Iterator for LinearCongruent {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let next = (self.multiplier as u128 * self.state as u128 + self.increment as u128)
            % self.range as u128;
        self.state = next as u64;
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::default_random_source;

    #[test]
    fn test_linear_congruent() {
        let s: Vec<u64> = linear_congruent(0, 8, 5, 1).unwrap().take(10).collect();
        assert_eq!(s, vec![1, 6, 7, 4, 5, 2, 3, 0, 1, 6]);
    }

    #[test]
    fn test_linear_congruent_validation() {
        assert!(linear_congruent(0, 0, 1, 0).is_err());
        assert!(linear_congruent(8, 8, 5, 1).is_err());
        assert!(linear_congruent(0, 8, 0, 1).is_err());
        assert!(linear_congruent(0, 8, 8, 1).is_err());
        assert!(linear_congruent(0, 8, 5, 8).is_err());
        // multiplier 必须 < range，range == 1 时没有合法的 multiplier
        assert!(linear_congruent(0, 1, 1, 0).is_err());
    }

    #[test]
    fn test_linear_congruent_large_range() {
        let range = u64::MAX - 58;
        let mut lcg = linear_congruent(range - 1, range, range - 1, 0).unwrap();
        // (range-1)² mod range = 1
        assert_eq!(lcg.next(), Some(1));
    }

    #[test]
    fn test_random_walk_steps() {
        let path: Vec<i64> = simple_random_walk(default_random_source(Some(0)))
            .take(200)
            .collect();
        let mut prev = 0;
        for &p in &path {
            assert_eq!((p - prev).abs(), 1);
            prev = p;
        }
    }

    #[test]
    fn test_random_walk_reproducible() {
        let a: Vec<i64> = random_walk(0.3, 2, -1, default_random_source(Some(17)))
            .unwrap()
            .take(50)
            .collect();
        let b: Vec<i64> = random_walk(0.3, 2, -1, default_random_source(Some(17)))
            .unwrap()
            .take(50)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_walk_degenerate_thresholds() {
        let up: Vec<i64> = random_walk(1.0, 1, -1, default_random_source(Some(3)))
            .unwrap()
            .take(5)
            .collect();
        assert_eq!(up, vec![1, 2, 3, 4, 5]);

        assert!(random_walk(1.5, 1, -1, default_random_source(Some(3))).is_err());
        assert!(random_walk(-0.1, 1, -1, default_random_source(Some(3))).is_err());
    }

    #[test]
    fn test_random_walk_saturates_at_bounds() {
        let high: Vec<i64> = random_walk(1.0, i64::MAX, 0, default_random_source(Some(5)))
            .unwrap()
            .take(3)
            .collect();
        assert_eq!(high, vec![i64::MAX, i64::MAX, i64::MAX]);

        let low: Vec<i64> = random_walk(1.0, i64::MIN, 1, default_random_source(Some(5)))
            .unwrap()
            .take(2)
            .collect();
        assert_eq!(low, vec![i64::MIN, i64::MIN]);
    }

    #[test]
    fn test_naive_integrate_quarter_circle() {
        let s = naive_integrate(
            100_000,
            0.0,
            1.0,
            |x| (1.0 - x * x).sqrt(),
            default_random_source(Some(0)),
        )
        .unwrap();
        assert!((s * 4.0 - std::f64::consts::PI).abs() < 0.02, "pi estimate {}", s * 4.0);
    }

    #[test]
    fn test_naive_integrate_scales_interval() {
        // ∫_2^4 x dx = 6
        let s = naive_integrate(50_000, 2.0, 4.0, |x| x, default_random_source(Some(8))).unwrap();
        assert!((s - 6.0).abs() < 0.05, "got {}", s);
    }

    #[test]
    fn test_naive_integrate_invalid() {
        assert!(naive_integrate(0, 0.0, 1.0, |x| x, default_random_source(Some(0))).is_err());
        assert!(
            naive_integrate(10, 0.0, f64::INFINITY, |x| x, default_random_source(Some(0)))
                .is_err()
        );
    }
}
