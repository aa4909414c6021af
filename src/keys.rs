//! Random key generation for benchmark and distribution inputs.

use rand::Rng;

/// Alphabet of generated keys: ASCII letters only.
pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Key length the benchmarks use.
pub const DEFAULT_KEY_LEN: usize = 15;

/// A random string of `len` ASCII letters.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect()
}

/// `count` random keys of length `len`. Duplicates are possible.
pub fn random_keys<R: Rng + ?Sized>(rng: &mut R, count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_key(rng, len)).collect()
}
