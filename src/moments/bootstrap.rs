//! Bootstrap 重采样 - 统计量估计及其标准误差

use super::power_sums::PowerSums;
use crate::random::RandomSource;
use crate::{Result, StatsError};

/// 对样本做 rounds 次重采样，返回 (统计量均值, 统计量总体标准差)
///
/// 样本会先物化成切片，resample 和 statistic 都在切片上工作。
pub fn bootstrap<T, I, R, S>(
    samples: I,
    rounds: usize,
    mut resample: R,
    mut statistic: S,
) -> Result<(f64, f64)>
where
    I: IntoIterator<Item = T>,
    R: FnMut(&[T]) -> Vec<T>,
    S: FnMut(&[T]) -> f64,
{
    if rounds == 0 {
        return Err(StatsError::InvalidArgument(
            "bootstrap needs at least one resampling round".to_string(),
        ));
    }

    let samples: Vec<T> = samples.into_iter().collect();
    let estimates: PowerSums = (0..rounds)
        .map(|_| statistic(resample(samples.as_slice()).as_slice()))
        .collect();

    let estimate = estimates.mean();
    let standard_error = estimates.population_std_dev();
    log::debug!(
        "bootstrap: {} rounds over {} samples, estimate={} se={}",
        rounds,
        samples.len(),
        estimate,
        standard_error
    );
    Ok((estimate, standard_error))
}

/// 有放回地均匀重采样，长度与原样本相同
pub fn resample_with_replacement<T, R>(rng: &mut R, samples: &[T]) -> Vec<T>
where
    T: Clone,
    R: RandomSource,
{
    if samples.is_empty() {
        return Vec::new();
    }
    let last = samples.len() - 1;
    (0..samples.len())
        .map(|_| samples[rng.next_in_range(0, last)].clone())
        .collect()
}
