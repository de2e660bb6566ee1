//! A binary min-heap over any [PartialOrd] element.
//!
//! Unlike [std::collections::BinaryHeap] this heap orders by [PartialOrd] (so `f32` keyed
//! entries work directly) and supports a membership test. Ties are not broken in any
//! particular order.
use core::cmp::Ordering;

use crate::error::QueueError;

#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    data: Vec<T>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> PriorityQueue<T> {
        PriorityQueue { data: Vec::new() }
    }
}

/// `a < b`, with incomparable elements treated as equal.
#[inline]
fn less<T: PartialOrd>(a: &T, b: &T) -> bool {
    matches!(a.partial_cmp(b), Some(Ordering::Less))
}

impl<T: PartialOrd> PriorityQueue<T> {
    pub fn new() -> PriorityQueue<T> {
        PriorityQueue::default()
    }

    pub fn with_capacity(capacity: usize) -> PriorityQueue<T> {
        PriorityQueue {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Appends the item and sifts it up. O(log n).
    pub fn enqueue(&mut self, item: T) {
        self.data.push(item);
        let mut child = self.data.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if !less(&self.data[child], &self.data[parent]) {
                break;
            }
            self.data.swap(child, parent);
            child = parent;
        }
    }

    /// Removes the smallest item. The root is swapped with the last leaf and sifted down
    /// towards the smaller child, the left one on ties. O(log n).
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.data.is_empty() {
            return Err(QueueError::Empty);
        }
        let front = self.data.swap_remove(0);
        let len = self.data.len();
        let mut parent = 0;
        loop {
            let mut child = 2 * parent + 1;
            if child >= len {
                break;
            }
            let right = child + 1;
            if right < len && less(&self.data[right], &self.data[child]) {
                child = right;
            }
            if !less(&self.data[child], &self.data[parent]) {
                break;
            }
            self.data.swap(parent, child);
            parent = child;
        }
        Ok(front)
    }

    /// The smallest item. O(1).
    pub fn peek(&self) -> Result<&T, QueueError> {
        self.data.first().ok_or(QueueError::Empty)
    }

    /// Linear scan by equality; the heap array has no secondary index. O(n).
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(item)
    }

    /// The backing array in heap order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: PartialOrd> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> PriorityQueue<T> {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}
