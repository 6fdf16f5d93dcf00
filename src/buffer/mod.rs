//! 缓冲区模块
//!
//! - 环形缓冲区 (固定容量，写满覆盖)
//! - 滞后配对 (基于环形缓冲区)

pub mod lag;
pub mod ring_buffer;

pub use lag::{lag, Lag, LagExt};
pub use ring_buffer::{Iter, RingBuffer};
