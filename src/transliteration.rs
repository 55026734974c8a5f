/*!
 * Banglish to Bengali script transliteration.
 *
 * A deterministic, rule-based phonetic converter. Latin clusters are matched
 * longest-first against a fixed table; vowels after a consonant become
 * dependent signs (kar), and consonant clusters are joined with a hasanta. An
 * "o" after a consonant is written as ো at the end of a word or before a
 * consonant that carries its own vowel (`tomay`, `bhalobashi`), and is the
 * inherent vowel otherwise (`kemon`, `bondhu`). Anything that isn't
 * an ASCII letter (spaces, punctuation, digits, text already in Bengali
 * script) passes through untouched.
 */

use crate::errors::TransliterationError;

const HASANTA: char = '\u{09CD}';

/// Longest Latin cluster in the table
const MAX_CLUSTER: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Glyph {
    Consonant(char),
    /// "y" is য word-initially and য় after a vowel
    Ya,
    /// Conjunct written as a consonant pair
    Conjunct(&'static str),
    Vowel { independent: char, sign: Option<char> },
    Sign(char),
}

fn lookup(cluster: &str) -> Option<Glyph> {
    use Glyph::*;

    let glyph = match cluster {
        "ksh" => Conjunct("ক্ষ"),
        "chh" => Consonant('ছ'),

        "kh" => Consonant('খ'),
        "gh" => Consonant('ঘ'),
        "ng" => Sign('ং'),
        "ch" => Consonant('চ'),
        "jh" => Consonant('ঝ'),
        "th" => Consonant('থ'),
        "dh" => Consonant('ধ'),
        "ph" => Consonant('ফ'),
        "bh" => Consonant('ভ'),
        "sh" => Consonant('শ'),
        "rh" => Consonant('\u{09DC}'),
        "aa" => Vowel { independent: 'আ', sign: Some('া') },
        "ee" => Vowel { independent: 'ঈ', sign: Some('ী') },
        "oo" => Vowel { independent: 'ঊ', sign: Some('ূ') },
        "oi" => Vowel { independent: 'ঐ', sign: Some('ৈ') },
        "ou" => Vowel { independent: 'ঔ', sign: Some('ৌ') },

        "k" | "q" => Consonant('ক'),
        "g" => Consonant('গ'),
        "c" => Consonant('চ'),
        "j" | "z" => Consonant('জ'),
        "t" => Consonant('ত'),
        "d" => Consonant('দ'),
        "n" => Consonant('ন'),
        "p" => Consonant('প'),
        "f" => Consonant('ফ'),
        "b" => Consonant('ব'),
        "v" => Consonant('ভ'),
        "m" => Consonant('ম'),
        "y" => Ya,
        "r" => Consonant('র'),
        "l" => Consonant('ল'),
        "s" => Consonant('স'),
        "h" => Consonant('হ'),
        "x" => Conjunct("ক্স"),
        "w" => Vowel { independent: 'ও', sign: Some('ো') },
        "a" => Vowel { independent: 'আ', sign: Some('া') },
        "i" => Vowel { independent: 'ই', sign: Some('ি') },
        "u" => Vowel { independent: 'উ', sign: Some('ু') },
        "e" => Vowel { independent: 'এ', sign: Some('ে') },
        // After a consonant "o" is either inherent or ো, see `opens_syllable`
        "o" => Vowel { independent: 'অ', sign: None },
        _ => return None,
    };

    Some(glyph)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Previous {
    Boundary,
    Consonant,
    Vowel,
}

/// Rule-based Banglish transliterator
#[derive(Debug, Clone, Default)]
pub struct BanglishTransliterator;

impl BanglishTransliterator {
    pub fn new() -> Self {
        Self
    }

    /// Transliterate romanized Bengali into Bengali script
    ///
    /// Fails only when the input contains no ASCII letters at all, in which
    /// case there is nothing to convert.
    pub fn transliterate(&self, roman: &str) -> Result<String, TransliterationError> {
        if !roman.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(TransliterationError::NoRomanizedText);
        }

        let chars: Vec<char> = roman.chars().map(|c| c.to_ascii_lowercase()).collect();
        let mut result = String::with_capacity(roman.len() * 3);
        let mut previous = Previous::Boundary;
        let mut i = 0;

        while i < chars.len() {
            if !chars[i].is_ascii_alphabetic() {
                result.push(chars[i]);
                previous = Previous::Boundary;
                i += 1;
                continue;
            }

            let (glyph, width) = Self::longest_match(&chars[i..]);
            let word_ends = chars.get(i + width).is_none_or(|c| !c.is_ascii_alphabetic());

            match glyph {
                Some(Glyph::Consonant(c)) => {
                    if previous == Previous::Consonant {
                        result.push(HASANTA);
                    }
                    result.push(c);
                    previous = Previous::Consonant;
                }
                Some(Glyph::Ya) => {
                    match previous {
                        Previous::Vowel => result.push('\u{09DF}'),
                        Previous::Consonant => {
                            result.push(HASANTA);
                            result.push('য');
                        }
                        Previous::Boundary => result.push('য'),
                    }
                    previous = Previous::Consonant;
                }
                Some(Glyph::Conjunct(s)) => {
                    if previous == Previous::Consonant {
                        result.push(HASANTA);
                    }
                    result.push_str(s);
                    previous = Previous::Consonant;
                }
                Some(Glyph::Vowel { independent, sign }) => {
                    if previous == Previous::Consonant {
                        match sign {
                            Some(sign) => result.push(sign),
                            None if word_ends || Self::opens_syllable(&chars[i + width..]) => {
                                result.push('ো')
                            }
                            None => {}
                        }
                    } else {
                        result.push(independent);
                    }
                    previous = Previous::Vowel;
                }
                Some(Glyph::Sign(c)) => {
                    result.push(c);
                    previous = Previous::Vowel;
                }
                None => {
                    result.push(chars[i]);
                    previous = Previous::Boundary;
                }
            }

            i += width;
        }

        Ok(result)
    }

    /// "o" is spoken out before a consonant that carries its own vowel
    fn opens_syllable(rest: &[char]) -> bool {
        let (glyph, width) = Self::longest_match(rest);
        if !matches!(glyph, Some(Glyph::Consonant(_) | Glyph::Ya | Glyph::Conjunct(_))) {
            return false;
        }
        matches!(Self::longest_match(&rest[width..]).0, Some(Glyph::Vowel { .. }))
    }

    fn longest_match(rest: &[char]) -> (Option<Glyph>, usize) {
        let mut cluster = String::with_capacity(MAX_CLUSTER);
        let mut best = (None, 1);

        for (width, c) in rest.iter().take(MAX_CLUSTER).enumerate() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            cluster.push(*c);
            if let Some(glyph) = lookup(&cluster) {
                best = (Some(glyph), width + 1);
            }
        }

        best
    }
}
