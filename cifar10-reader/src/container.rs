//! Output sequences the decoder appends to.
//!
//! The decoder only needs to append, write by index and query the length of the sequences it
//! fills, so any growable sequence can be used to hold images or labels.
use std::collections::VecDeque;

pub trait Container: Default {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reserve(&mut self, additional: usize);

    fn push(&mut self, item: Self::Item);

    fn resize_with<F: FnMut() -> Self::Item>(&mut self, new_len: usize, f: F);

    /// Overwrites the element at `index`, panics if `index` is out of range.
    fn set(&mut self, index: usize, item: Self::Item);

    /// Drops trailing elements so that at most `len` remain.
    fn truncate(&mut self, len: usize);
}

impl<T> Container for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional)
    }

    fn push(&mut self, item: T) {
        Vec::push(self, item)
    }

    fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        Vec::resize_with(self, new_len, f)
    }

    fn set(&mut self, index: usize, item: T) {
        self[index] = item
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len)
    }
}

impl<T> Container for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn reserve(&mut self, additional: usize) {
        VecDeque::reserve(self, additional)
    }

    fn push(&mut self, item: T) {
        self.push_back(item)
    }

    fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        VecDeque::resize_with(self, new_len, f)
    }

    fn set(&mut self, index: usize, item: T) {
        self[index] = item
    }

    fn truncate(&mut self, len: usize) {
        VecDeque::truncate(self, len)
    }
}
