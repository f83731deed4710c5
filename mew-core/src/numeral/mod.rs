//! Syllable numerals.
//!
//! A numeral is a run of `mew` syllables whose count is the value:
//! `mew` is 1, `mewmewmew` is 3. A single `.` splits the run into an
//! integer part and a fractional part, and the two syllable counts are
//! glued together as decimal text, so `mewmew.mewmewmew` is `2.3`.
//!
//! The fractional count is written out as literal digits, not scaled by
//! its own magnitude: twelve syllables after the point read as `.12`.

use crate::environment::prelude::Value;

pub const SYLLABLE: &str = "mew";
pub const SYLLABLE_LEN: usize = SYLLABLE.len();
pub const SEPARATOR: char = '.';

/// Returns `true` if `word` is one or more whole `mew` syllables.
pub fn is_syllable_run(word: &str) -> bool {
    !word.is_empty()
        && word.len() % SYLLABLE_LEN == 0
        && word.as_bytes()
            .chunks(SYLLABLE_LEN)
            .all(|chunk| chunk == SYLLABLE.as_bytes())
}

/// Number of whole syllables in `run`. Trailing partial syllables are dropped.
pub fn syllable_count(run: &str) -> usize {
    run.len() / SYLLABLE_LEN
}

/// Decodes a raw numeral token into its value.
///
/// Never fails: an empty integer run reads as zero, and only the text
/// between the first and second separator counts as the fraction.
pub fn decode(raw: &str) -> Value {
    match raw.split_once(SEPARATOR) {
        None => syllable_count(raw) as Value,
        Some((integer, rest)) => {
            let fraction = rest.split(SEPARATOR).next().unwrap_or_default();
            let literal = format!("{}.{}", syllable_count(integer), syllable_count(fraction));

            literal.parse::<Value>().unwrap_or_default()
        }
    }
}

/// Builds the canonical numeral for a whole count, `encode(3) == "mewmewmew"`.
pub fn encode(count: usize) -> String {
    SYLLABLE.repeat(count)
}
