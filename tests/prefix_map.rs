#[cfg(feature = "fnv")]
use asciimath_translate::prefix_map::FnvHashPrefixMap;
#[cfg(feature = "qp-trie")]
use asciimath_translate::prefix_map::QpTriePrefixMap;
use asciimath_translate::catalog::{SymbolRef, SYMBOLS};
use asciimath_translate::prefix_map::{HashPrefixMap, LinearPrefixMap};
use asciimath_translate::{Token, Tokenizer};
use rand::distributions::{Alphanumeric, Slice};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::WeightedIndex;

fn spellings() -> Vec<(&'static str, SymbolRef)> {
    SYMBOLS
        .iter()
        .flat_map(|entry| entry.spellings.iter().map(move |&s| (s, entry)))
        .collect()
}

fn random_string<V>(rng: &mut impl Rng, tokens: &[(&str, V)]) -> String {
    let token = Slice::new(tokens).unwrap();
    let choice = WeightedIndex::new([1, 1, 3]).unwrap();

    let mut res = String::new();
    for _ in 0..30 {
        match rng.sample(&choice) {
            0 => res.push(' '),
            1 => res.push(rng.sample(Alphanumeric).into()),
            2 => res.push_str(rng.sample(&token).0),
            _ => unreachable!(),
        }
    }
    res
}

#[test]
fn every_spelling_is_one_token() {
    let tokens = LinearPrefixMap::from_vec(spellings());
    for (spelling, entry) in spellings() {
        let found: Vec<_> = Tokenizer::with_tokens(spelling, &tokens).collect();
        assert_eq!(found, [(spelling, Token::Symbol(entry))], "{spelling}");
    }
}

macro_rules! make_test {
    ($name:ident, $struct:ident, $factory:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn random_prefix() {
                let linear_tokens = LinearPrefixMap::from_vec(spellings());
                let ref_tokens = $struct::$factory(spellings());

                let mut rng = StdRng::from_seed([0; 32]);
                for _ in 0..20 {
                    let string = random_string(&mut rng, &spellings());
                    let mut linear = Tokenizer::with_tokens(&string, &linear_tokens);
                    let mut other = Tokenizer::with_tokens(&string, &ref_tokens);
                    loop {
                        match (linear.next(), other.next()) {
                            (Some(left), Some(right)) => assert_eq!(left, right),
                            (Some(left), None) => panic!("test missing {left:?}"),
                            (None, Some(right)) => panic!("linear missing {right:?}"),
                            (None, None) => break,
                        }
                    }
                }
            }

            #[test]
            fn longest_prefix() {
                let tokens = $struct::$factory(spellings());
                let found: Vec<_> = Tokenizer::with_tokens("rarr ->> <=>", &tokens)
                    .map(|(slice, _)| slice)
                    .collect();
                assert_eq!(found, ["rarr", "->>", "<=>"]);
            }
        }
    };
}

make_test! {hash, HashPrefixMap, from_iter}
#[cfg(feature = "fnv")]
make_test! {fnv, FnvHashPrefixMap, from_iter_hasher}
#[cfg(feature = "qp-trie")]
make_test! {qptrie, QpTriePrefixMap, from_iter}
