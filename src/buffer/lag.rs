//! 滞后配对 - (k 步之前的值, 当前值)
//!
//! 用一个容量为 lag 的 RingBuffer 做单次前向扫描，
//! 缓冲区写满之后每读入一个元素产出一对。

use super::ring_buffer::RingBuffer;
use crate::{Result, StatsError};

/// 惰性滞后配对迭代器
///
/// 只能前向消费一次；重新迭代需要重新构造。
#[derive(Debug, Clone)]
pub struct Lag<I: Iterator> {
    iter: I,
    buffer: RingBuffer<I::Item>,
}

/// 对任意序列构造滞后配对，lag 必须 >= 1
pub fn lag<I>(seq: I, lag: usize) -> Result<Lag<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    if lag == 0 {
        return Err(StatsError::InvalidArgument(
            "lag must be strictly positive".to_string(),
        ));
    }
    Ok(Lag {
        iter: seq.into_iter(),
        buffer: RingBuffer::new(lag)?,
    })
}

impl<I> Lag<I>
where
    I: Iterator,
{
    /// 滞后步数
    pub fn steps(&self) -> usize {
        self.buffer.capacity()
    }
}

impl<I> Iterator for Lag<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.iter.next()?;
            if self.buffer.is_full() {
                if let Ok(lagged) = self.buffer.pop() {
                    self.buffer.push(current.clone());
                    return Some((lagged, current));
                }
            }
            self.buffer.push(current);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let pending = self.buffer.capacity() - self.buffer.len();
        (
            lower.saturating_sub(pending),
            upper.map(|u| u.saturating_sub(pending)),
        )
    }
}

/// 迭代器扩展: `seq.lag(2)`
pub trait LagExt: Iterator + Sized
where
    Self::Item: Clone,
{
    fn lag(self, lag: usize) -> Result<Lag<Self>> {
        self::lag(self, lag)
    }
}

impl<I> LagExt for I
where
    I: Iterator,
    I::Item: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_pairs() {
        let s = [1, 3, 4, 8, 10];

        let lag1: Vec<_> = lag(s, 1).unwrap().collect();
        let lag2: Vec<_> = lag(s, 2).unwrap().collect();
        let lag3: Vec<_> = lag(s, 3).unwrap().collect();
        let lag4: Vec<_> = lag(s, 4).unwrap().collect();

        assert_eq!(lag1, vec![(1, 3), (3, 4), (4, 8), (8, 10)]);
        assert_eq!(lag2, vec![(1, 4), (3, 8), (4, 10)]);
        assert_eq!(lag3, vec![(1, 8), (3, 10)]);
        assert_eq!(lag4, vec![(1, 10)]);
    }

    #[test]
    fn test_lag_too_long_is_empty() {
        let s = [1, 3, 4, 8, 10];
        assert_eq!(lag(s, 5).unwrap().count(), 0);
        assert_eq!(lag(s, 50).unwrap().count(), 0);
        assert_eq!(lag(Vec::<i32>::new(), 1).unwrap().count(), 0);
    }

    #[test]
    fn test_zero_lag_rejected() {
        let err = lag([1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, StatsError::InvalidArgument(_)));
    }

    #[test]
    fn test_lag_ext_on_infinite_sequence() {
        let pairs: Vec<_> = (0u64..).lag(3).unwrap().take(4).collect();
        assert_eq!(pairs, vec![(0, 3), (1, 4), (2, 5), (3, 6)]);
    }

    #[test]
    fn test_lag_owned_items() {
        let words = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let pairs: Vec<_> = words.into_iter().lag(1).unwrap().collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "b".to_string()),
                ("b".to_string(), "c".to_string())
            ]
        );
    }

    #[test]
    fn test_size_hint() {
        let it = lag(vec![1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.steps(), 2);
    }
}
