use super::PrefixMap;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A prefix map with one hash map per key length
///
/// A query probes every length from the longest key down, so it takes `O(longest_key)` lookups.
/// This is the catalog's index when the `qp-trie` feature is off.
///
/// # Example
/// ```
/// use asciimath_translate::prefix_map::{HashPrefixMap, PrefixMap};
///
/// let map = HashPrefixMap::from_iter([("o", 'o'), ("oo", '∞'), ("o+", '⊕')]);
/// assert_eq!(map.get_longest_prefix("oo+"), Some((2, &'∞')));
/// ```
#[derive(Debug, Clone)]
pub struct HashPrefixMap<K, V, S = RandomState> {
    by_len: Vec<HashMap<K, V, S>>,
}

impl<K, V, S> HashPrefixMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher + Default,
{
    /// Create from an iterator with a hasher other than the default
    pub fn from_iter_hasher<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut by_len: Vec<HashMap<K, V, S>> = Vec::new();
        for (key, val) in iter {
            let len = key.borrow().len();
            if by_len.len() <= len {
                by_len.resize_with(len + 1, HashMap::default);
            }
            by_len[len].insert(key, val);
        }
        HashPrefixMap { by_len }
    }
}

impl<K, V> FromIterator<(K, V)> for HashPrefixMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_iter_hasher(iter)
    }
}

impl<K, V, S> PrefixMap<V> for HashPrefixMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        let longest = inp.len().min(self.by_len.len().saturating_sub(1));
        (0..=longest)
            .rev()
            .filter(|&len| inp.is_char_boundary(len))
            .find_map(|len| {
                self.by_len
                    .get(len)
                    .and_then(|map| map.get(&inp[..len]))
                    .map(|val| (len, val))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{HashPrefixMap, PrefixMap};

    #[test]
    fn longest_spelling_wins() {
        let map = HashPrefixMap::from_iter([("-", 0), ("->", 1), ("->>", 2), ("-<", 3), ("-<", 4)]);
        assert_eq!(map.get_longest_prefix("->>x"), Some((3, &2)));
        assert_eq!(map.get_longest_prefix("->x"), Some((2, &1)));
        assert_eq!(map.get_longest_prefix("-<="), Some((2, &4)));
        assert_eq!(map.get_longest_prefix("<-"), None);
        assert_eq!(map.get_longest_prefix("∞"), None);
    }

    #[test]
    fn empty_key_and_input() {
        let map = HashPrefixMap::from_iter([("", 0), ("oo", 1)]);
        assert_eq!(map.get_longest_prefix("oo "), Some((2, &1)));
        assert_eq!(map.get_longest_prefix("x"), Some((0, &0)));
        let empty: HashPrefixMap<&str, ()> = HashPrefixMap::from_iter([]);
        assert_eq!(empty.get_longest_prefix("x"), None);
    }
}
