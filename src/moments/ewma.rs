//! EWMA - 指数加权移动平均
//!
//! E_t = (1 - decay) * x_t + decay * E_{t-1}，以第一个观测值作为种子。
//! decay 是历史值的权重，1 - decay 是当前值的权重。

use super::StreamingOperator;
use crate::{Result, StatsError};

/// 对整个序列做左折叠，空序列返回 None
///
/// decay 由调用方保证在 [0, 1] 内，这里不做截断。
pub fn ewma<I, F>(seq: I, decay: f64, f: F) -> Option<f64>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> f64,
{
    let mut values = seq.into_iter().map(f);
    let first = values.next()?;
    Some(values.fold(first, |acc, x| (1.0 - decay) * x + decay * acc))
}

pub fn ewma_f64<I: IntoIterator<Item = f64>>(seq: I, decay: f64) -> Option<f64> {
    ewma(seq, decay, |x| x)
}

/// 流式 EWMA 算子
#[derive(Debug, Clone)]
pub struct Ewma {
    decay: f64,
    value: Option<f64>,
    count: usize,
}

impl Ewma {
    /// decay 必须在 [0, 1] 内
    pub fn new(decay: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&decay) {
            return Err(StatsError::InvalidArgument(format!(
                "decay must be between 0 and 1 inclusive, got {}",
                decay
            )));
        }
        Ok(Self {
            decay,
            value: None,
            count: 0,
        })
    }

    /// 按周期构造: α = 2 / (period + 1), decay = 1 - α
    pub fn with_period(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(StatsError::InvalidArgument(
                "period must be strictly positive".to_string(),
            ));
        }
        Self::new(1.0 - 2.0 / (period as f64 + 1.0))
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl StreamingOperator for Ewma {
    type Input = f64;
    type Output = Option<f64>;

    fn update(&mut self, x: f64) {
        self.count += 1;
        self.value = Some(match self.value {
            None => x,
            Some(prev) => (1.0 - self.decay) * x + self.decay * prev,
        });
    }

    fn value(&self) -> Option<f64> {
        self.value
    }

    fn count(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        self.value = None;
        self.count = 0;
    }
}
