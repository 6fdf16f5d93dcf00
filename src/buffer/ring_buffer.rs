//! 环形缓冲区 - 固定容量的循环容器
//!
//! 固定容量环形缓冲区，用于滞后配对和有界窗口：
//! - O(1) 写入和弹出
//! - 写满后覆盖最旧元素，容量永不扩展
//! - 只允许移除最旧元素 (front-only)

use std::fmt;

use crate::{Result, StatsError};

/// 泛型环形缓冲区
///
/// `head` 指向最旧元素，`tail` 指向最新写入的元素；两者在空缓冲区时为 `None`。
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// 内部存储，长度恒为 capacity
    slots: Vec<Option<T>>,
    /// 容量
    capacity: usize,
    /// 当前元素数量
    count: usize,
    /// 最旧元素位置
    head: Option<usize>,
    /// 最新元素位置
    tail: Option<usize>,
}

impl<T> RingBuffer<T> {
    /// 创建指定容量的环形缓冲区，容量必须 >= 1
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StatsError::InvalidArgument(
                "ring buffer capacity must be at least 1".to_string(),
            ));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            capacity,
            count: 0,
            head: None,
            tail: None,
        })
    }

    #[inline]
    fn advance(&self, i: usize) -> usize {
        (i + 1) % self.capacity
    }

    /// 写入新元素；已满时覆盖最旧元素
    pub fn push(&mut self, item: T) {
        let tail = match self.tail {
            Some(t) => self.advance(t),
            None => 0,
        };
        self.slots[tail] = Some(item);
        self.tail = Some(tail);

        match self.head {
            None => self.head = Some(tail),
            // 覆盖了 head 所在槽位，head 前移
            Some(h) if self.count == self.capacity => self.head = Some(self.advance(h)),
            Some(_) => {}
        }

        if self.count < self.capacity {
            self.count += 1;
        }
    }

    /// 弹出最旧元素
    pub fn pop(&mut self) -> Result<T> {
        let head = self.head.ok_or(StatsError::EmptyContainer)?;
        let item = self.slots[head].take().ok_or(StatsError::EmptyContainer)?;

        if self.tail == Some(head) {
            // 最后一个元素，恢复初始空状态
            self.head = None;
            self.tail = None;
        } else {
            self.head = Some(self.advance(head));
        }
        self.count -= 1;
        Ok(item)
    }

    /// 获取最旧元素
    pub fn oldest(&self) -> Option<&T> {
        self.head.and_then(|h| self.slots[h].as_ref())
    }

    /// 获取最新元素
    pub fn latest(&self) -> Option<&T> {
        self.tail.and_then(|t| self.slots[t].as_ref())
    }

    /// 当前元素数量
    pub fn len(&self) -> usize {
        self.count
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 是否已满
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// 容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 清空缓冲区
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.count = 0;
        self.head = None;
        self.tail = None;
    }

    /// 迭代器（从旧到新）
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            offset: 0,
        }
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// 是否包含指定元素
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|element| element == item)
    }

    /// 仅当 item 等于最旧元素时移除它
    pub fn remove(&mut self, item: &T) -> bool {
        if self.oldest() == Some(item) {
            self.pop().is_ok()
        } else {
            false
        }
    }
}

impl<T: Clone> RingBuffer<T> {
    /// 从 offset 开始按从旧到新的顺序复制到目标切片
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        if offset > dest.len() || dest.len() - offset < self.count {
            return Err(StatsError::InvalidArgument(format!(
                "destination of length {} cannot hold {} items at offset {}",
                dest.len(),
                self.count,
                offset
            )));
        }
        for (slot, element) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = element.clone();
        }
        Ok(())
    }

    /// 转换为 Vec
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// 从旧到新的借用迭代器，恰好产出 count 个元素
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buffer.count {
            return None;
        }
        let head = self.buffer.head?;
        let slot = (head + self.offset) % self.buffer.capacity;
        self.offset += 1;
        self.buffer.slots[slot].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.count.saturating_sub(self.offset);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Count: {}", self.count)?;
        for (i, element) in self.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", element)?;
            } else {
                write!(f, ",{}", element)?;
            }
        }
        Ok(())
    }
}
