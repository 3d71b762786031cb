use chrono::{DateTime, Utc};
use hanu_persist::Thread;

/// In-memory cache of the acting user's threads, kept newest-first.
///
/// Mirrors successful remote writes immediately so the navigation view never
/// waits for a re-fetch to reflect a rename or a recency bump. Mutated only
/// through these methods (single writer, provider-scoped).
#[derive(Debug, Default)]
pub struct ThreadList {
    threads: Vec<Thread>,
}

impl ThreadList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn get(&self, thread_id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn clear(&mut self) {
        self.threads.clear();
    }

    /// Replace the whole cache (fresh fetch from the store).
    pub fn set_all(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        self.sort();
    }

    /// Add a newly created thread.
    pub fn insert(&mut self, thread: Thread) {
        self.threads.push(thread);
        self.sort();
    }

    /// Mirror a successful rename.
    pub fn apply_rename(&mut self, thread_id: &str, title: &str, date: DateTime<Utc>) {
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == thread_id) {
            thread.title = title.to_string();
            thread.date = date;
        }
        self.sort();
    }

    /// Mirror a successful recency bump.
    pub fn apply_touch(&mut self, thread_id: &str, date: DateTime<Utc>) {
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == thread_id) {
            thread.date = date;
        }
        self.sort();
    }

    fn sort(&mut self) {
        self.threads.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn thread(id: &str, secs: i64) -> Thread {
        Thread {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("thread {}", id),
            date: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn set_all_sorts_newest_first() {
        let mut list = ThreadList::new();
        list.set_all(vec![thread("a", 10), thread("b", 30), thread("c", 20)]);

        let order: Vec<&str> = list.threads().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn touch_moves_thread_to_the_front() {
        let mut list = ThreadList::new();
        list.set_all(vec![thread("a", 10), thread("b", 30)]);

        list.apply_touch("a", Utc.timestamp_opt(40, 0).unwrap());
        assert_eq!(list.threads()[0].id, "a");
    }

    #[test]
    fn rename_updates_title_and_recency() {
        let mut list = ThreadList::new();
        list.set_all(vec![thread("a", 10), thread("b", 30)]);

        list.apply_rename("a", "renamed", Utc.timestamp_opt(50, 0).unwrap());
        assert_eq!(list.threads()[0].title, "renamed");
        assert_eq!(list.threads()[0].id, "a");
    }
}
