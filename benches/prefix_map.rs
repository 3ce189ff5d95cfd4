#![feature(test)]

mod examples;

extern crate test;

#[cfg(feature = "fnv")]
use asciimath_translate::prefix_map::FnvHashPrefixMap;
#[cfg(feature = "qp-trie")]
use asciimath_translate::prefix_map::QpTriePrefixMap;
use asciimath_translate::catalog::{SymbolRef, SYMBOLS};
use asciimath_translate::prefix_map::{HashPrefixMap, LinearPrefixMap};
use asciimath_translate::Tokenizer;
use examples::{EXAMPLES, RANDOM_EXAMPLES};
use std::hint::black_box;
use test::Bencher;

fn entries() -> Vec<(&'static str, SymbolRef)> {
    SYMBOLS
        .iter()
        .flat_map(|entry| entry.spellings.iter().map(move |&s| (s, entry)))
        .collect()
}

macro_rules! make_bench {
    ($name:ident, $struct:ident, $factory:ident) => {
        mod $name {
            use super::*;

            #[bench]
            fn example_prefix(bench: &mut Bencher) {
                let tokens = $struct::$factory(entries());
                bench.iter(|| {
                    for example in EXAMPLES {
                        for token in Tokenizer::with_tokens(black_box(example), &tokens) {
                            black_box(token);
                        }
                    }
                });
            }

            #[bench]
            fn random_prefix(bench: &mut Bencher) {
                let tokens = $struct::$factory(entries());
                let examples = &*RANDOM_EXAMPLES; // deref to for generation outside of bench
                bench.iter(|| {
                    for example in examples {
                        for token in Tokenizer::with_tokens(black_box(example), &tokens) {
                            black_box(token);
                        }
                    }
                });
            }
        }
    };
}

make_bench! {linear, LinearPrefixMap, from_vec}
make_bench! {hash, HashPrefixMap, from_iter}
#[cfg(feature = "fnv")]
make_bench! {fnv, FnvHashPrefixMap, from_iter_hasher}
#[cfg(feature = "qp-trie")]
make_bench! {qptrie, QpTriePrefixMap, from_iter}
