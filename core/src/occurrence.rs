use crate::{DedupPolicy, Title};
use std::fmt;

struct OccurrenceEntry {
    title: Title,
    next: Option<Box<OccurrenceEntry>>,
}

/// Prepend-only list of the document titles a word occurred in.
///
/// The head is the most recently recorded title.
#[derive(Default)]
pub struct OccurrenceList {
    head: Option<Box<OccurrenceEntry>>,
    len: usize,
}

impl OccurrenceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-element list holding `title`.
    pub fn with_title(title: &Title) -> Self {
        let mut list = Self::new();
        list.prepend(title.clone());
        list
    }

    /// Record an occurrence in `title`, returning whether an entry was added.
    ///
    /// `Adjacent` only compares against the head, so a word seen in A, then B,
    /// then A again ends up with two A entries.
    pub fn record(&mut self, title: &Title, policy: DedupPolicy) -> bool {
        let seen = match policy {
            DedupPolicy::Adjacent => self.head().is_some_and(|h| h == &**title),
            DedupPolicy::FullList => self.contains(title),
        };
        if seen {
            return false;
        }
        self.prepend(title.clone());
        true
    }

    fn prepend(&mut self, title: Title) {
        let next = self.head.take();
        self.head = Some(Box::new(OccurrenceEntry { title, next }));
        self.len += 1;
    }

    pub fn head(&self) -> Option<&str> {
        self.head.as_deref().map(|e| &*e.title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.iter().any(|t| t == title)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { next: self.head.as_deref() }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

// Unlink iteratively; the derived drop would recurse once per entry.
impl Drop for OccurrenceList {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut entry) = cur {
            cur = entry.next.take();
        }
    }
}

impl fmt::Debug for OccurrenceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for OccurrenceList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for OccurrenceList {}

pub struct Iter<'a> {
    next: Option<&'a OccurrenceEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(&entry.title)
    }
}

impl<'a> IntoIterator for &'a OccurrenceList {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Title {
        Title::from(s)
    }

    #[test]
    fn newest_title_comes_first() {
        let mut list = OccurrenceList::with_title(&t("A"));
        list.record(&t("B"), DedupPolicy::Adjacent);
        list.record(&t("C"), DedupPolicy::Adjacent);
        assert_eq!(list.to_vec(), vec!["C", "B", "A"]);
        assert_eq!(list.head(), Some("C"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn adjacent_policy_only_checks_head() {
        let mut list = OccurrenceList::new();
        assert!(list.record(&t("A"), DedupPolicy::Adjacent));
        assert!(!list.record(&t("A"), DedupPolicy::Adjacent));
        assert!(list.record(&t("B"), DedupPolicy::Adjacent));
        assert!(list.record(&t("A"), DedupPolicy::Adjacent));
        assert_eq!(list.to_vec(), vec!["A", "B", "A"]);
    }

    #[test]
    fn full_list_policy_rejects_any_repeat() {
        let mut list = OccurrenceList::new();
        list.record(&t("A"), DedupPolicy::FullList);
        list.record(&t("B"), DedupPolicy::FullList);
        assert!(!list.record(&t("A"), DedupPolicy::FullList));
        assert_eq!(list.to_vec(), vec!["B", "A"]);
    }

    #[test]
    fn titles_are_shared_not_copied() {
        let title = t("Shared");
        let list = OccurrenceList::with_title(&title);
        assert_eq!(std::sync::Arc::strong_count(&title), 2);
        drop(list);
        assert_eq!(std::sync::Arc::strong_count(&title), 1);
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow() {
        let mut list = OccurrenceList::new();
        for i in 0..200_000 {
            list.record(&t(&i.to_string()), DedupPolicy::Adjacent);
        }
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
