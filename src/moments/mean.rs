//! 增量均值

use super::StreamingOperator;

/// 惰性前缀均值迭代器，每个输入产出一个当前均值
///
/// 单次前向消费，不可重启。
#[derive(Debug, Clone)]
pub struct MeanIncremental<I, F> {
    iter: I,
    f: F,
    total: f64,
    count: usize,
}

pub fn mean_incremental<I, F>(seq: I, f: F) -> MeanIncremental<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    MeanIncremental {
        iter: seq.into_iter(),
        f,
        total: 0.0,
        count: 0,
    }
}

impl<I, F> Iterator for MeanIncremental<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> f64,
{
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let item = self.iter.next()?;
        self.total += (self.f)(item);
        self.count += 1;
        Some(self.total / self.count as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// 流式均值算子
#[derive(Debug, Clone, Default)]
pub struct RunningMean {
    total: f64,
    count: usize,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sum(&self) -> f64 {
        self.total
    }
}

impl StreamingOperator for RunningMean {
    type Input = f64;
    type Output = Option<f64>;

    fn update(&mut self, x: f64) {
        self.total += x;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total / self.count as f64)
        }
    }

    fn count(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_incremental() {
        let s: Vec<f64> = mean_incremental(1..=10, |x| x as f64).collect();
        let expected = vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5];
        assert_eq!(s, expected);
    }

    #[test]
    fn test_mean_incremental_is_lazy() {
        let mut calls = 0;
        let first: Vec<f64> = mean_incremental(0u64.., |x| {
            calls += 1;
            x as f64
        })
        .take(3)
        .collect();
        assert_eq!(first, vec![0.0, 0.5, 1.0]);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_running_mean() {
        let mut m = RunningMean::new();
        assert_eq!(m.value(), None);
        m.extend_from([1.0, 2.0, 3.0]);
        assert_eq!(m.value(), Some(2.0));
        assert_eq!(m.sum(), 6.0);
        m.reset();
        assert_eq!(m.count(), 0);
    }
}
