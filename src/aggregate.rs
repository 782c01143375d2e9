//! Union of per-worker word sets

use crate::dedup::WordSet;

/// Merge all worker sets into one
///
/// The largest set is reused as the base so the fewest words get rehashed.
/// Only call this once every worker has finished.
pub fn union_all(mut sets: Vec<WordSet>) -> WordSet {
    let largest = sets
        .iter()
        .enumerate()
        .max_by_key(|(_, set)| set.len())
        .map(|(index, _)| index);

    let Some(largest) = largest else {
        return WordSet::new();
    };

    let mut merged = sets.swap_remove(largest);
    for set in sets {
        merged.absorb(set);
    }

    log::debug!(
        "union holds {} unique words (~{})",
        merged.len(),
        bytesize::ByteSize(merged.memory_usage() as u64)
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BStr;

    fn set_of(words: &[&str]) -> WordSet {
        words.iter().map(|w| BStr::new(*w)).collect()
    }

    fn sorted(set: &WordSet) -> Vec<String> {
        set.sorted().iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_union() {
        let merged = union_all(vec![
            set_of(&["foo", "bar"]),
            set_of(&["bar", "baz"]),
            WordSet::new(),
        ]);
        assert_eq!(sorted(&merged), vec!["bar", "baz", "foo"]);
    }

    #[test]
    fn test_union_is_commutative() {
        let a = set_of(&["alpha", "beta"]);
        let b = set_of(&["beta", "gamma", "delta"]);

        let ab = union_all(vec![a.clone(), b.clone()]);
        let ba = union_all(vec![b, a]);
        assert_eq!(sorted(&ab), sorted(&ba));
    }

    #[test]
    fn test_union_is_idempotent() {
        let a = set_of(&["alpha", "beta"]);
        let merged = union_all(vec![a.clone(), a.clone()]);
        assert_eq!(sorted(&merged), sorted(&a));
    }

    #[test]
    fn test_union_of_nothing() {
        assert!(union_all(Vec::new()).is_empty());
        assert!(union_all(vec![WordSet::new(), WordSet::new()]).is_empty());
    }
}
