use super::PrefixMap;
use qp_trie::Trie;
use std::borrow::Borrow;

#[derive(Debug, PartialEq, Eq, Clone)]
struct Key<K>(K);

impl<K: Borrow<str>> Borrow<[u8]> for Key<K> {
    fn borrow(&self) -> &[u8] {
        self.0.borrow().as_bytes()
    }
}

/// A prefix map backed by a qp-trie
///
/// The catalog's default index, requires the `qp-trie` feature. A query walks down the trie one
/// byte at a time and stops as soon as no key continues the input, so it takes
/// `O(longest_prefix)`.
///
/// # Example
/// ```
/// use asciimath_translate::prefix_map::{PrefixMap, QpTriePrefixMap};
///
/// let map = QpTriePrefixMap::from_iter([("sub", 1), ("sube", 2), ("sum", 3)]);
/// assert_eq!(map.get_longest_prefix("subset"), Some((3, &1)));
/// ```
#[derive(Debug, Clone)]
pub struct QpTriePrefixMap<K: Clone, V>(Trie<Key<K>, V>);

impl<K, V> FromIterator<(K, V)> for QpTriePrefixMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut trie = Trie::new();
        for (key, val) in iter {
            trie.insert(Key(key), val);
        }
        QpTriePrefixMap(trie)
    }
}

impl<K, V> PrefixMap<V> for QpTriePrefixMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let bytes = inp.as_ref().as_bytes();
        let mut subtrie = self.0.subtrie(&bytes[..0]);
        let mut found = subtrie.get(&bytes[..0]).map(|val| (0, val));
        for len in 1..=bytes.len() {
            let prefix = &bytes[..len];
            subtrie = subtrie.subtrie(prefix);
            if subtrie.is_empty() {
                break;
            }
            if let Some(val) = subtrie.get(prefix) {
                found = Some((len, val));
            }
        }
        found
    }
}
