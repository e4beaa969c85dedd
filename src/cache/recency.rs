//! Recency List Module
//!
//! Tracks access order of live entries for least-recently-used tie breaking.

/// Stable index of an entry slot in the cache arena.
pub type Handle = usize;

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: Option<Handle>,
    next: Option<Handle>,
    /// Monotonic push counter; larger means more recently used
    stamp: u64,
}

// == Recency List ==
/// Doubly-linked list over arena handles.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Links live in a table indexed by handle, so every operation is O(1) and a
/// handle that is not linked is simply an empty slot in that table.
#[derive(Debug, Default)]
pub struct RecencyList {
    links: Vec<Option<Link>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
    next_stamp: u64,
}

impl RecencyList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a handle as most recently used.
    ///
    /// If the handle is already linked it is unlinked first, so touching a new
    /// or an existing handle both leave it at the front exactly once.
    pub fn touch(&mut self, handle: Handle) {
        self.remove(handle);
        self.push_front(handle);
    }

    // == Remove ==
    /// Unlinks a handle. Returns false (and changes nothing) if it was not linked.
    pub fn remove(&mut self, handle: Handle) -> bool {
        let Some(link) = self.links.get_mut(handle).and_then(Option::take) else {
            return false;
        };

        match link.prev {
            Some(prev) => {
                if let Some(prev_link) = self.link_mut(prev) {
                    prev_link.next = link.next;
                }
            }
            None => self.head = link.next,
        }

        match link.next {
            Some(next) => {
                if let Some(next_link) = self.link_mut(next) {
                    next_link.prev = link.prev;
                }
            }
            None => self.tail = link.prev,
        }

        self.len -= 1;
        true
    }

    // == Peek Oldest ==
    /// Returns the least recently used handle without unlinking it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<Handle> {
        self.tail
    }

    // == Older Of ==
    /// Returns whichever of two handles was used less recently.
    ///
    /// A handle that is not linked loses to one that is. Returns None if
    /// neither is linked.
    pub fn older_of(&self, a: Handle, b: Handle) -> Option<Handle> {
        match (self.stamp(a), self.stamp(b)) {
            (Some(sa), Some(sb)) => Some(if sa <= sb { a } else { b }),
            (Some(_), None) => Some(a),
            (None, Some(_)) => Some(b),
            (None, None) => None,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Contains ==
    #[allow(dead_code)]
    pub fn contains(&self, handle: Handle) -> bool {
        self.stamp(handle).is_some()
    }

    /// Iterates handles from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn push_front(&mut self, handle: Handle) {
        if self.links.len() <= handle {
            self.links.resize(handle + 1, None);
        }

        let stamp = self.next_stamp;
        self.next_stamp += 1;

        self.links[handle] = Some(Link {
            prev: None,
            next: self.head,
            stamp,
        });

        if let Some(old_head) = self.head {
            if let Some(old_link) = self.link_mut(old_head) {
                old_link.prev = Some(handle);
            }
        }
        self.head = Some(handle);

        if self.tail.is_none() {
            self.tail = Some(handle);
        }

        self.len += 1;
    }

    fn stamp(&self, handle: Handle) -> Option<u64> {
        self.links
            .get(handle)
            .and_then(|link| link.as_ref())
            .map(|link| link.stamp)
    }

    fn link_mut(&mut self, handle: Handle) -> Option<&mut Link> {
        self.links.get_mut(handle).and_then(Option::as_mut)
    }
}

/// Iterator from most recently used to least recently used.
pub struct Iter<'a> {
    list: &'a RecencyList,
    current: Option<Handle>,
}

impl Iterator for Iter<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.current?;
        self.current = self
            .list
            .links
            .get(handle)
            .and_then(|link| link.as_ref())
            .and_then(|link| link.next);
        Some(handle)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList) -> Vec<Handle> {
        list.iter().collect()
    }

    #[test]
    fn test_recency_new() {
        let list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_oldest(), None);
    }

    #[test]
    fn test_recency_touch_new_handles() {
        let mut list = RecencyList::new();

        list.touch(0);
        list.touch(1);
        list.touch(2);

        assert_eq!(list.len(), 3);
        // 0 is oldest (added first)
        assert_eq!(list.peek_oldest(), Some(0));
        assert_eq!(order(&list), vec![2, 1, 0]);
    }

    #[test]
    fn test_recency_touch_existing_handle() {
        let mut list = RecencyList::new();

        list.touch(0);
        list.touch(1);
        list.touch(2);

        // Touch 0 again - should move to front
        list.touch(0);

        assert_eq!(list.len(), 3);
        assert_eq!(list.peek_oldest(), Some(1));
        assert_eq!(order(&list), vec![0, 2, 1]);
    }

    #[test]
    fn test_recency_remove_middle_head_and_tail() {
        let mut list = RecencyList::new();
        for handle in 0..4 {
            list.touch(handle);
        }

        assert!(list.remove(1));
        assert_eq!(order(&list), vec![3, 2, 0]);

        assert!(list.remove(3));
        assert_eq!(order(&list), vec![2, 0]);

        assert!(list.remove(0));
        assert_eq!(order(&list), vec![2]);
        assert_eq!(list.peek_oldest(), Some(2));

        assert!(list.remove(2));
        assert!(list.is_empty());
        assert_eq!(list.peek_oldest(), None);
    }

    #[test]
    fn test_recency_remove_is_idempotent() {
        let mut list = RecencyList::new();

        list.touch(0);
        list.touch(1);

        assert!(list.remove(0));
        // Removing again, or removing a handle never seen, is a no-op
        assert!(!list.remove(0));
        assert!(!list.remove(42));

        assert_eq!(list.len(), 1);
        assert!(list.contains(1));
        assert!(!list.contains(0));
    }

    #[test]
    fn test_recency_touch_same_handle_multiple_times() {
        let mut list = RecencyList::new();

        list.touch(7);
        list.touch(7);
        list.touch(7);

        // Should only be linked once
        assert_eq!(list.len(), 1);
        assert_eq!(order(&list), vec![7]);
    }

    #[test]
    fn test_recency_older_of() {
        let mut list = RecencyList::new();

        list.touch(0);
        list.touch(1);
        assert_eq!(list.older_of(0, 1), Some(0));
        assert_eq!(list.older_of(1, 0), Some(0));

        // Touching 0 makes 1 the older of the two
        list.touch(0);
        assert_eq!(list.older_of(0, 1), Some(1));
    }

    #[test]
    fn test_recency_older_of_unlinked() {
        let mut list = RecencyList::new();

        list.touch(0);
        assert_eq!(list.older_of(0, 5), Some(0));
        assert_eq!(list.older_of(5, 0), Some(0));
        assert_eq!(list.older_of(5, 6), None);
    }

    #[test]
    fn test_recency_reuses_removed_handle() {
        let mut list = RecencyList::new();

        list.touch(0);
        list.touch(1);
        list.remove(0);
        list.touch(0);

        assert_eq!(order(&list), vec![0, 1]);
        assert_eq!(list.peek_oldest(), Some(1));
    }
}
