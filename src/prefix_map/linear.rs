use super::PrefixMap;
use std::borrow::Borrow;

/// A prefix map that scans every key, longest first
///
/// Queries are `O(keys)`, but the map only needs key equality and holds nothing but the entries.
/// Its answers are easy to trust, which makes it the reference the other maps are tested against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearPrefixMap<K, V>(Box<[(K, V)]>);

impl<K, V> LinearPrefixMap<K, V>
where
    K: Borrow<str>,
{
    /// Create from a vector of entries
    pub fn from_vec<B>(inp: B) -> Self
    where
        B: Into<Vec<(K, V)>>,
    {
        let mut entries = inp.into();
        // later duplicates win, so they have to sort first
        entries.reverse();
        entries.sort_by(|(left, _), (right, _)| {
            let left = left.borrow();
            let right = right.borrow();
            right.len().cmp(&left.len()).then_with(|| left.cmp(right))
        });
        entries.dedup_by(|(later, _), (kept, _)| {
            <K as Borrow<str>>::borrow(later) == <K as Borrow<str>>::borrow(kept)
        });
        LinearPrefixMap(entries.into())
    }
}

impl<K, V> FromIterator<(K, V)> for LinearPrefixMap<K, V>
where
    K: Borrow<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_vec(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<K: Borrow<str>, V> PrefixMap<V> for LinearPrefixMap<K, V> {
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        self.0
            .iter()
            .find(|(key, _)| inp.starts_with(key.borrow()))
            .map(|(key, val)| (key.borrow().len(), val))
    }
}
