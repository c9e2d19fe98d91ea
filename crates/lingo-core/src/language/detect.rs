//! Script-based language detection

use super::jamo::{has_complete_syllable, is_hangul_syllable, is_jamo, transliterate_char};
use crate::value_objects::Language;

/// Classify text by script
///
/// Any Hangul codepoint makes the text Korean, otherwise any kana makes it
/// Japanese, otherwise it is English.
pub fn detect(text: &str) -> Language {
    if text.chars().any(is_hangul) {
        Language::Ko
    } else if text.chars().any(is_kana) {
        Language::Ja
    } else {
        Language::En
    }
}

/// True when the text is only Hangul jamo plus punctuation, whitespace or
/// symbols, with at least one jamo and no complete syllable
///
/// Such text ("ㅋㅋㅋ", "ㅠㅠ") has nothing a translator can work with and
/// comes back unchanged. Decomposed Korean is also written in jamo, but its
/// lead consonant + vowel pairs form syllables, so it is not ambiguous.
pub fn is_ambiguous_script(text: &str) -> bool {
    let mut saw_jamo = false;
    for c in text.chars() {
        if is_jamo(c) {
            saw_jamo = true;
        } else if c.is_alphanumeric() {
            return false;
        }
    }
    saw_jamo && !has_complete_syllable(text)
}

/// Prepare text for a translation request
///
/// Korean text that mixes complete syllables with stray jamo ("좋아요 ㅋㅋ")
/// gets each jamo transliterated, since backends echo isolated jamo back and
/// mangle the surrounding translation. Anything else is returned unchanged.
pub fn sanitize_for_translation_request(text: &str, source: Language) -> String {
    if source != Language::Ko || !has_complete_syllable(text) || !text.chars().any(is_stray_jamo)
    {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate_char(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// A compatibility jamo, the form typed on its own ("ㅋ")
fn is_stray_jamo(c: char) -> bool {
    matches!(c, '\u{3131}'..='\u{318E}')
}

fn is_hangul(c: char) -> bool {
    is_hangul_syllable(c) || is_jamo(c)
}

fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{31F0}'..='\u{31FF}' // Katakana phonetic extensions
        | '\u{FF66}'..='\u{FF9F}' // Halfwidth katakana
    )
}
