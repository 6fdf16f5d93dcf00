//! 经验分布函数 (ECDF) 与 DKW 置信带
//!
//! 由固定数据集一次性构造，不支持增量更新。
//! cdf(x) 是右连续阶梯函数: 小于最小值为 0，大于等于最大值为 1。

use serde::{Deserialize, Serialize};

use crate::{Result, StatsError};

/// 单点 CDF 估计及其置信带
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// 经验 CDF 值
    pub p: f64,
    /// 下界 max(p - ε, 0)
    pub lower: f64,
    /// 上界 min(p + ε, 1)
    pub upper: f64,
}

impl ConfidenceBand {
    /// 带宽
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// 经验分布估计器
#[derive(Debug, Clone)]
pub struct EmpiricalCdf {
    /// 排序去重后的取值
    values: Vec<f64>,
    /// cumulative[i] = 小于等于 values[i] 的观测数量
    cumulative: Vec<usize>,
    /// 观测总数
    n: usize,
}

impl EmpiricalCdf {
    /// 从数据集构造；空数据集或包含 NaN 时报错
    pub fn new<I: IntoIterator<Item = f64>>(data: I) -> Result<Self> {
        // + 0.0 把 -0.0 规整为 0.0
        let mut sorted: Vec<f64> = data.into_iter().map(|x| x + 0.0).collect();
        if sorted.is_empty() {
            return Err(StatsError::InvalidArgument(
                "empirical distribution needs at least one observation".to_string(),
            ));
        }
        if sorted.iter().any(|x| x.is_nan()) {
            return Err(StatsError::InvalidArgument(
                "empirical distribution cannot contain NaN".to_string(),
            ));
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut values: Vec<f64> = Vec::new();
        let mut cumulative: Vec<usize> = Vec::new();
        for (i, &x) in sorted.iter().enumerate() {
            match values.last() {
                Some(&last) if last == x => {
                    if let Some(c) = cumulative.last_mut() {
                        *c = i + 1;
                    }
                }
                _ => {
                    values.push(x);
                    cumulative.push(i + 1);
                }
            }
        }

        log::debug!(
            "empirical cdf: {} observations, {} distinct values",
            sorted.len(),
            values.len()
        );
        Ok(Self {
            values,
            cumulative,
            n: sorted.len(),
        })
    }

    /// 观测数量
    pub fn len(&self) -> usize {
        self.n
    }

    /// 构造时已拒绝空数据集，恒为 false
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn distinct_values(&self) -> &[f64] {
        &self.values
    }

    /// 小于等于 x 的观测比例；x 为 NaN 时返回 NaN
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < self.min() {
            return 0.0;
        }
        if x > self.max() {
            return 1.0;
        }
        // 最大的 v <= x
        let idx = self.values.partition_point(|&v| v <= x);
        self.cumulative[idx - 1] as f64 / self.n as f64
    }

    /// ε = sqrt(ln(2/α) / (2n))，α 必须在 (0, 1) 内
    pub fn epsilon(&self, alpha: f64) -> Result<f64> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(StatsError::InvalidArgument(format!(
                "alpha must be in (0, 1), got {}",
                alpha
            )));
        }
        Ok(((2.0 / alpha).ln() / self.n as f64 / 2.0).sqrt())
    }

    /// cdf(x) 及其 1 - α 置信带
    pub fn cdf_with_band(&self, x: f64, alpha: f64) -> Result<ConfidenceBand> {
        let e = self.epsilon(alpha)?;
        let p = self.cdf(x);
        Ok(ConfidenceBand {
            p,
            lower: (p - e).max(0.0),
            upper: (p + e).min(1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmpiricalCdf {
        EmpiricalCdf::new([1.0, 5.0, 4.0, 4.0, 2.0, 3.0, 2.0, 1.0]).unwrap()
    }

    #[test]
    fn test_cdf_values() {
        let f = sample();
        assert_eq!(f.cdf(-10.0), 0.0);
        assert_eq!(f.cdf(1.0), 0.25);
        assert_eq!(f.cdf(2.0), 0.5);
        assert_eq!(f.cdf(3.0), 0.625);
        assert_eq!(f.cdf(4.0), 0.875);
        assert_eq!(f.cdf(4.8), 0.875);
        assert_eq!(f.cdf(5.0), 1.0);
        assert_eq!(f.cdf(100.0), 1.0);
        assert_eq!(f.cdf(1.5), 0.25);
    }

    #[test]
    fn test_structure() {
        let f = sample();
        assert_eq!(f.len(), 8);
        assert_eq!(f.min(), 1.0);
        assert_eq!(f.max(), 5.0);
        assert_eq!(f.distinct_values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_monotone() {
        let f = EmpiricalCdf::new([0.3, -2.0, 7.5, 0.3, 1.0, 4.4, -0.5]).unwrap();
        let mut prev = 0.0;
        let mut x = -5.0;
        while x < 10.0 {
            let p = f.cdf(x);
            assert!(p >= prev);
            assert!((0.0..=1.0).contains(&p));
            prev = p;
            x += 0.05;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn test_band_bounds() {
        let f = sample();
        for &alpha in &[0.01, 0.05, 0.1, 0.5, 0.99] {
            for &x in &[-1.0, 1.0, 2.5, 3.0, 4.9, 5.0, 8.0] {
                let band = f.cdf_with_band(x, alpha).unwrap();
                assert!(0.0 <= band.lower);
                assert!(band.lower <= band.p);
                assert!(band.p <= band.upper);
                assert!(band.upper <= 1.0);
            }
        }

        // ε(0.05) with n = 8
        let band = f.cdf_with_band(3.0, 0.05).unwrap();
        let e = ((2.0f64 / 0.05).ln() / 16.0).sqrt();
        assert_eq!(band.p, 0.625);
        assert!((band.lower - (0.625 - e).max(0.0)).abs() < 1e-12);
        assert!((band.upper - (0.625 + e).min(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_band_width_shrinks() {
        let small = EmpiricalCdf::new((0..20).map(|i| i as f64)).unwrap();
        let large = EmpiricalCdf::new((0..2000).map(|i| i as f64 / 100.0)).unwrap();

        // α 越大带越窄
        assert!(small.epsilon(0.2).unwrap() < small.epsilon(0.05).unwrap());
        // n 越大带越窄
        assert!(large.epsilon(0.05).unwrap() < small.epsilon(0.05).unwrap());

        let wide = large.cdf_with_band(10.0, 0.01).unwrap();
        let narrow = large.cdf_with_band(10.0, 0.2).unwrap();
        assert!(narrow.width() < wide.width());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(EmpiricalCdf::new(Vec::new()).is_err());
        assert!(EmpiricalCdf::new([1.0, f64::NAN]).is_err());

        let f = sample();
        assert!(f.cdf_with_band(1.0, 0.0).is_err());
        assert!(f.cdf_with_band(1.0, 1.0).is_err());
        assert!(f.cdf_with_band(1.0, -0.5).is_err());
        assert!(f.cdf_with_band(1.0, f64::NAN).is_err());
        assert!(f.cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_epsilon_rejects_alpha_out_of_range() {
        let f = EmpiricalCdf::new([1.0, 2.0, 3.0]).unwrap();
        for &alpha in &[0.0, -1.0, 1.0, 3.0, f64::NAN] {
            let err = f.epsilon(alpha).unwrap_err();
            assert!(matches!(err, StatsError::InvalidArgument(_)), "alpha {}", alpha);
        }
        let e = f.epsilon(0.05).unwrap();
        assert!((e - ((2.0f64 / 0.05).ln() / 6.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_zero() {
        let f = EmpiricalCdf::new([-0.0, 0.0, 1.0]).unwrap();
        assert_eq!(f.distinct_values().len(), 2);
        assert!((f.cdf(0.0) - 2.0 / 3.0).abs() < 1e-12);
    }
}
