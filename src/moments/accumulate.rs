//! 前缀累加 (惰性 scan)

/// 惰性前缀累加迭代器，每个输入产出一次累加后的状态
///
/// 初始值本身不产出。单次前向消费，不可重启。
#[derive(Debug, Clone)]
pub struct Accumulate<I, A, F> {
    iter: I,
    acc: A,
    f: F,
}

/// acc ← f(acc, item)，依次产出每一步的 acc
pub fn accumulate<I, A, F>(seq: I, init: A, f: F) -> Accumulate<I::IntoIter, A, F>
where
    I: IntoIterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    Accumulate {
        iter: seq.into_iter(),
        acc: init,
        f,
    }
}

impl<I, A, F> Iterator for Accumulate<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    type Item = A;

    fn next(&mut self) -> Option<A> {
        let item = self.iter.next()?;
        self.acc = (self.f)(self.acc.clone(), item);
        Some(self.acc.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
