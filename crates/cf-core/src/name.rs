//! # Name Segment Encoder
//!
//! Extracts the two 3-letter name segments (positions 1–3 and 4–6) from
//! the family and given names.
//!
//! ## Extraction Rule
//!
//! Letters are classified case-insensitively as consonants or vowels;
//! anything else — spaces, apostrophes, accented letters, digits — is
//! ignored entirely. Consonants win over vowels, vowels over `X` padding.
//! The given name (and only the given name) applies the four-consonant
//! rule: with four or more consonants available, the segment is the 1st,
//! 3rd and 4th of them.
//!
//! Both entry points are total: any input, including empty text, produces
//! exactly three uppercase letters.

/// Consonants of the code alphabet, in classification order.
const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXYZ";

/// Vowels of the code alphabet.
const VOWELS: &str = "AEIOU";

/// Padding letter used when a name has fewer than three usable letters.
const PAD: char = 'X';

/// Segment width for each encoded name.
const SEGMENT_LEN: usize = 3;

/// Encode a family name into its 3-letter segment.
///
/// Takes the first three consonants when available; never applies the
/// four-consonant rule.
pub fn family_name_segment(name: &str) -> String {
    encode(name, false)
}

/// Encode a given name into its 3-letter segment.
///
/// With four or more consonants, takes the 1st, 3rd and 4th; otherwise
/// behaves exactly like [`family_name_segment`].
pub fn given_name_segment(name: &str) -> String {
    encode(name, true)
}

fn encode(name: &str, four_consonant_rule: bool) -> String {
    let mut consonants: Vec<char> = Vec::new();
    let mut vowels: Vec<char> = Vec::new();

    for c in name.chars() {
        let up = c.to_ascii_uppercase();
        if CONSONANTS.contains(up) {
            consonants.push(up);
        } else if VOWELS.contains(up) {
            vowels.push(up);
        }
    }

    if four_consonant_rule && consonants.len() >= 4 {
        return [consonants[0], consonants[2], consonants[3]]
            .into_iter()
            .collect();
    }

    if consonants.len() >= SEGMENT_LEN {
        return consonants[..SEGMENT_LEN].iter().collect();
    }

    // Too few consonants: append vowels, then pad with X.
    let mut letters = consonants;
    letters.extend(vowels);
    letters.truncate(SEGMENT_LEN);
    while letters.len() < SEGMENT_LEN {
        letters.push(PAD);
    }
    letters.into_iter().collect()
}
