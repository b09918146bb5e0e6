//! FIFO work queue plus visited set.
//!
//! A URL lives in at most one of `pending` and `visited`; once visited it is
//! never queued again. Appending at the tail keeps the traversal breadth-first.

use crate::normalize::NormalizedUrl;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<NormalizedUrl>,
    queued: HashSet<NormalizedUrl>,
    visited: HashSet<NormalizedUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the seed URLs, each at most once. Returns how many were queued.
    pub fn seed<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = NormalizedUrl>,
    {
        urls.into_iter().filter(|u| self.offer(u.clone())).count()
    }

    /// Pop the head of the queue.
    pub fn next(&mut self) -> Option<NormalizedUrl> {
        let url = self.pending.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    /// Record `url` as visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, url: NormalizedUrl) -> bool {
        if self.queued.remove(&url) {
            self.pending.retain(|p| p != &url);
        }
        self.visited.insert(url)
    }

    /// Queue `url` unless it is already pending or visited.
    pub fn offer(&mut self, url: NormalizedUrl) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &NormalizedUrl) -> bool {
        self.visited.contains(url)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> NormalizedUrl {
        NormalizedUrl::parse(&format!("https://example.test{path}")).unwrap()
    }

    #[test]
    fn duplicate_seeds_queue_once() {
        let mut f = Frontier::new();
        let queued = f.seed([url("/a"), url("/b"), url("/a#frag")]);
        assert_eq!(queued, 2);
        assert_eq!(f.pending_len(), 2);
    }

    #[test]
    fn dequeues_in_fifo_order() {
        let mut f = Frontier::new();
        f.seed([url("/a")]);
        f.offer(url("/b"));
        f.offer(url("/c"));
        assert_eq!(f.next(), Some(url("/a")));
        assert_eq!(f.next(), Some(url("/b")));
        assert_eq!(f.next(), Some(url("/c")));
        assert_eq!(f.next(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn visited_urls_are_never_requeued() {
        let mut f = Frontier::new();
        f.seed([url("/a")]);
        let a = f.next().unwrap();
        assert!(f.mark_visited(a.clone()));
        assert!(!f.mark_visited(a.clone()));
        assert!(!f.offer(a.clone()));
        assert!(f.is_visited(&a));
        assert_eq!(f.visited_len(), 1);
        assert_eq!(f.pending_len(), 0);
    }

    #[test]
    fn pending_urls_are_not_offered_twice() {
        let mut f = Frontier::new();
        assert!(f.offer(url("/a")));
        assert!(!f.offer(url("/a")));
        assert_eq!(f.pending_len(), 1);
    }

    #[test]
    fn marking_a_pending_url_removes_it_from_the_queue() {
        let mut f = Frontier::new();
        f.seed([url("/a"), url("/b")]);
        assert!(f.mark_visited(url("/b")));
        assert_eq!(f.pending_len(), 1);
        assert_eq!(f.next(), Some(url("/a")));
        assert_eq!(f.next(), None);
    }
}
