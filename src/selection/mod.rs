//! 顺序统计量选择
//!
//! - Lomuto 分区: 以 a[y] 为枢轴，原地重排 a[x..=y]
//! - 随机化快速选择: 期望 O(n) 找到第 k 小元素 (k 从 1 开始)
//!
//! 子区间之外的元素永远不会被访问或移动。

use crate::random::{default_random_source, RandomSource};
use crate::{Result, StatsError};

fn check_bounds(len: usize, x: usize, y: usize) -> Result<()> {
    if y >= len {
        return Err(StatsError::InvalidArgument(format!(
            "y must be smaller than the array length {}, got {}",
            len, y
        )));
    }
    if x > y {
        return Err(StatsError::InvalidArgument(format!(
            "x must not be larger than y, got x={} y={}",
            x, y
        )));
    }
    Ok(())
}

/// Lomuto 分区，返回枢轴的最终下标
///
/// 结束后 a[x..p] <= a[p] < a[p+1..=y]。
pub fn partition<T: PartialOrd>(a: &mut [T], x: usize, y: usize) -> Result<usize> {
    check_bounds(a.len(), x, y)?;

    // store 指向下一个 "<= pivot" 元素应放的位置 (即 i + 1)
    let mut store = x;
    for j in x..y {
        if a[j] <= a[y] {
            a.swap(store, j);
            store += 1;
        }
    }
    a.swap(store, y);
    Ok(store)
}

/// 在 a[x..=y] 中选择第 k 小的元素 (1 <= k <= y - x + 1)
///
/// pivot_chooser(lo, hi) 必须返回 [lo, hi] 内的下标；返回越界下标时报错，
/// 此时子区间可能已经被部分重排。
pub fn select<T, P>(mut pivot_chooser: P, a: &mut [T], k: usize, x: usize, y: usize) -> Result<T>
where
    T: PartialOrd + Clone,
    P: FnMut(usize, usize) -> usize,
{
    check_bounds(a.len(), x, y)?;
    if k == 0 || k > y - x + 1 {
        return Err(StatsError::InvalidArgument(format!(
            "k must be between 1 and {}, got {}",
            y - x + 1,
            k
        )));
    }

    let (mut lo, mut hi, mut k) = (x, y, k);
    loop {
        if lo == hi {
            return Ok(a[lo].clone());
        }

        let chosen = pivot_chooser(lo, hi);
        if chosen < lo || chosen > hi {
            return Err(StatsError::InvalidArgument(format!(
                "pivot index {} outside [{}, {}]",
                chosen, lo, hi
            )));
        }
        a.swap(chosen, hi);

        let pivot = partition(a, lo, hi)?;
        // 枢轴在子区间内的排名 (从 1 开始)
        let z = pivot - lo + 1;
        log::trace!("select: range [{}, {}] pivot {} rank {} k {}", lo, hi, pivot, z, k);

        if k == z {
            return Ok(a[pivot].clone());
        } else if k < z {
            hi = pivot - 1;
        } else {
            k -= z;
            lo = pivot + 1;
        }
    }
}

/// 使用注入的随机数源选择枢轴
pub fn randomized_select_with<T, R>(
    rng: &mut R,
    a: &mut [T],
    k: usize,
    x: usize,
    y: usize,
) -> Result<T>
where
    T: PartialOrd + Clone,
    R: RandomSource,
{
    select(|lo, hi| rng.next_in_range(lo, hi), a, k, x, y)
}

/// 使用默认随机数源的随机化选择
pub fn randomized_select<T>(a: &mut [T], k: usize, x: usize, y: usize) -> Result<T>
where
    T: PartialOrd + Clone,
{
    let mut rng = default_random_source(None);
    randomized_select_with(&mut rng, a, k, x, y)
}

/// 整个切片上的第 k 小元素
pub fn kth_smallest<T>(a: &mut [T], k: usize) -> Result<T>
where
    T: PartialOrd + Clone,
{
    if a.is_empty() {
        return Err(StatsError::InvalidArgument(
            "cannot select from an empty array".to_string(),
        ));
    }
    let y = a.len() - 1;
    randomized_select(a, k, 0, y)
}
