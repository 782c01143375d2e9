//! Word deduplication
//!
//! A `WordSet` is an in-memory hash set of byte-string words. Each worker
//! owns one outright while it reads, so unlike a shared deduplicator it
//! needs no locking.

use ahash::RandomState;
use bstr::{BStr, BString};
use hashbrown::HashSet;

/// Insert-only set of unique words
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    set: HashSet<BString, RandomState>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word, returning true if it was not present yet
    ///
    /// The word is only copied when it is new.
    pub fn insert(&mut self, word: &BStr) -> bool {
        if self.set.contains(word) {
            return false;
        }
        self.set.insert(word.to_owned())
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.set.contains(BStr::new(word))
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Move every word of `other` into this set
    pub fn absorb(&mut self, other: WordSet) {
        self.set.reserve(other.len());
        self.set.extend(other.set);
    }

    /// Words in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &BStr> + '_ {
        self.set.iter().map(|w| BStr::new(w))
    }

    /// Words in ascending byte order
    pub fn sorted(&self) -> Vec<&BStr> {
        let mut words: Vec<&BStr> = self.iter().collect();
        words.sort_unstable();
        words
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        let content: usize = self.set.iter().map(|w| w.len()).sum();
        content + self.set.capacity() * std::mem::size_of::<BString>()
    }
}

impl<'a> Extend<&'a BStr> for WordSet {
    fn extend<I: IntoIterator<Item = &'a BStr>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a BStr> for WordSet {
    fn from_iter<I: IntoIterator<Item = &'a BStr>>(iter: I) -> Self {
        let mut set = WordSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(words: &[&str]) -> WordSet {
        words.iter().map(|w| BStr::new(*w)).collect()
    }

    #[test]
    fn test_insert_reports_new_words() {
        let mut set = WordSet::new();

        assert!(set.insert(BStr::new("test1")));
        assert!(set.insert(BStr::new("test2")));
        assert!(!set.insert(BStr::new("test1")));

        assert_eq!(set.len(), 2);
        assert!(set.contains(b"test1"));
        assert!(!set.contains(b"test3"));
    }

    #[test]
    fn test_exact_byte_equality() {
        let set = set_of(&["Password", "password", "password "]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_absorb() {
        let mut left = set_of(&["foo", "bar"]);
        left.absorb(set_of(&["bar", "baz"]));

        assert_eq!(left.len(), 3);
        assert!(left.contains(b"baz"));
    }

    #[test]
    fn test_sorted() {
        let set = set_of(&["pear", "apple", "Zebra", "123"]);
        let sorted: Vec<String> = set.sorted().iter().map(|w| w.to_string()).collect();

        assert_eq!(sorted, vec!["123", "Zebra", "apple", "pear"]);
    }

    #[test]
    fn test_empty() {
        let set = WordSet::new();
        assert!(set.is_empty());
        assert!(set.sorted().is_empty());
    }
}
