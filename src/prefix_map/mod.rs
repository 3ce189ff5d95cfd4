//! String keyed maps that answer longest-prefix queries
//!
//! The tokenizer asks one question of the symbol catalog at every position: which spelling is the
//! longest prefix of the remaining input. Most of the cost of tokenizing asciimath is spent here,
//! so the catalog is indexed by one of these maps.
//!
//! On catalog-sized key sets the `qp-trie` backed map is the quickest. Without that feature the
//! catalog falls back to [HashPrefixMap], which is close behind when built with the `fnv` hasher.
//! [LinearPrefixMap] is a straight scan and mainly serves as a reference.
//!
//! # Example
//!
//! ```
//! use asciimath_translate::catalog::SYMBOLS;
//! use asciimath_translate::prefix_map::{LinearPrefixMap, PrefixMap};
//! use asciimath_translate::Tokenizer;
//!
//! let token_map: LinearPrefixMap<_, _> = SYMBOLS
//!     .iter()
//!     .flat_map(|entry| entry.spellings.iter().map(move |&s| (s, entry)))
//!     .collect();
//! assert_eq!(token_map.get_longest_prefix("rarr x").map(|(len, _)| len), Some(4));
//! let tokens: Vec<_> = Tokenizer::with_tokens("sum_i x_i", &token_map).collect();
//! assert_eq!(tokens.len(), 6);
//! ```

mod hash;
mod linear;
#[cfg(feature = "qp-trie")]
mod trie;

#[cfg(feature = "fnv")]
use ::fnv::FnvBuildHasher;
pub use hash::HashPrefixMap;
pub use linear::LinearPrefixMap;
#[cfg(feature = "qp-trie")]
pub use trie::QpTriePrefixMap;

/// A [HashPrefixMap] using the fnv hasher, requires the `fnv` feature
///
/// # Example
/// ```
/// use asciimath_translate::prefix_map::{FnvHashPrefixMap, PrefixMap};
///
/// let map = FnvHashPrefixMap::from_iter_hasher([("->", 1), ("->>", 2)]);
/// assert_eq!(map.get_longest_prefix("->>x"), Some((3, &2)));
/// ```
#[cfg(feature = "fnv")]
pub type FnvHashPrefixMap<K, V> = HashPrefixMap<K, V, FnvBuildHasher>;

/// A map that can find the entry whose key is the longest prefix of an input
pub trait PrefixMap<V> {
    /// The byte length and value of the longest key that prefixes `inp`
    ///
    /// When keys repeat, the value inserted last wins.
    ///
    /// # Example
    /// ```
    /// use asciimath_translate::prefix_map::{HashPrefixMap, PrefixMap};
    ///
    /// let map = HashPrefixMap::from_iter([("<", 1), ("<=", 2), ("<=>", 3)]);
    /// assert_eq!(map.get_longest_prefix("<=x"), Some((2, &2)));
    /// assert_eq!(map.get_longest_prefix("x"), None);
    /// ```
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)>;
}

impl<V, M: PrefixMap<V> + ?Sized> PrefixMap<V> for &M {
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        (**self).get_longest_prefix(inp)
    }
}
