//! Hangul jamo classification and transliteration

/// True for Hangul jamo: letters that are components of a syllable rather than
/// a complete syllable
pub fn is_jamo(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'   // Hangul Jamo
        | '\u{3131}'..='\u{318E}' // Hangul Compatibility Jamo
        | '\u{A960}'..='\u{A97F}' // Hangul Jamo Extended-A
        | '\u{D7B0}'..='\u{D7FF}' // Hangul Jamo Extended-B
    )
}

pub(crate) fn is_hangul_syllable(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}')
}

/// Conjoining lead consonant (choseong)
fn is_lead_consonant(c: char) -> bool {
    matches!(c, '\u{1100}'..='\u{115F}' | '\u{A960}'..='\u{A97F}')
}

/// Conjoining vowel (jungseong)
fn is_conjoining_vowel(c: char) -> bool {
    matches!(c, '\u{1160}'..='\u{11A7}' | '\u{D7B0}'..='\u{D7C6}')
}

/// True if the text holds at least one complete syllable
///
/// A syllable is either precomposed (U+AC00..U+D7A3) or spelled with
/// conjoining jamo as a lead consonant directly followed by a vowel, which
/// is how decomposed (NFD) Korean is written.
pub(crate) fn has_complete_syllable(text: &str) -> bool {
    let mut after_lead = false;
    for c in text.chars() {
        if is_hangul_syllable(c) || (after_lead && is_conjoining_vowel(c)) {
            return true;
        }
        after_lead = is_lead_consonant(c);
    }
    false
}

/// Replace each compatibility jamo with a Latin approximation
///
/// Characters without a table entry pass through unchanged.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate_char(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

pub(crate) fn transliterate_char(c: char) -> Option<&'static str> {
    let latin = match c {
        // Consonants
        'ㄱ' => "g",
        'ㄲ' => "kk",
        'ㄳ' => "gs",
        'ㄴ' => "n",
        'ㄵ' => "nj",
        'ㄶ' => "nh",
        'ㄷ' => "d",
        'ㄸ' => "tt",
        'ㄹ' => "r",
        'ㄺ' => "lg",
        'ㄻ' => "lm",
        'ㄼ' => "lb",
        'ㄽ' => "ls",
        'ㄾ' => "lt",
        'ㄿ' => "lp",
        'ㅀ' => "lh",
        'ㅁ' => "m",
        'ㅂ' => "b",
        'ㅃ' => "pp",
        'ㅄ' => "bs",
        'ㅅ' => "s",
        'ㅆ' => "ss",
        'ㅇ' => "o",
        'ㅈ' => "j",
        'ㅉ' => "jj",
        'ㅊ' => "ch",
        'ㅋ' => "k",
        'ㅌ' => "t",
        'ㅍ' => "p",
        'ㅎ' => "h",
        // Vowels
        'ㅏ' => "a",
        'ㅐ' => "ae",
        'ㅑ' => "ya",
        'ㅒ' => "yae",
        'ㅓ' => "eo",
        'ㅔ' => "e",
        'ㅕ' => "yeo",
        'ㅖ' => "ye",
        'ㅗ' => "o",
        'ㅘ' => "wa",
        'ㅙ' => "wae",
        'ㅚ' => "oe",
        'ㅛ' => "yo",
        'ㅜ' => "u",
        'ㅝ' => "wo",
        'ㅞ' => "we",
        'ㅟ' => "wi",
        'ㅠ' => "yu",
        'ㅡ' => "eu",
        'ㅢ' => "ui",
        'ㅣ' => "i",
        _ => return None,
    };
    Some(latin)
}
