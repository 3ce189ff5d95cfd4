use asciimath_translate::catalog::SYMBOLS;
use lazy_static::lazy_static;
use rand::distributions::{Alphanumeric, Slice};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::WeightedIndex;

pub const EXAMPLES: [&str; 4] = [
    "sum_(i=1)^n i^3=((n(n+1))/2)^2",
    "lim_(N->oo) sum_(i=0)^N int_0^1 f(x)dx",
    "[[int x dx], [log(x+1)]]",
    "((1,2))int sin{x^2}/4pidxroot(5)(x_1^2+x_2^2)",
];

fn random_string(rng: &mut impl Rng, spellings: &[&str]) -> String {
    let token = Slice::new(spellings).unwrap();
    let choice = WeightedIndex::new([1, 1, 3]).unwrap();

    let mut res = String::new();
    for _ in 0..30 {
        match rng.sample(&choice) {
            0 => res.push(' '),
            1 => res.push(rng.sample(Alphanumeric).into()),
            2 => res.push_str(rng.sample(&token)),
            _ => unreachable!(),
        }
    }
    res
}

lazy_static! {
    pub static ref SPELLINGS: Vec<&'static str> = SYMBOLS
        .iter()
        .flat_map(|entry| entry.spellings.iter().copied())
        .collect();
    pub static ref RANDOM_EXAMPLES: [String; 30] = {
        let mut rng = StdRng::from_seed([0; 32]);
        [(); 30].map(|_| random_string(&mut rng, &SPELLINGS))
    };
}
