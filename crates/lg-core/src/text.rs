/// Normalize free text for matching: lowercase, drop punctuation, collapse whitespace.
///
/// A word-final `'s` is dropped, so `"EMPAC's"` reads as `"empac"`. Hyphens,
/// slashes and underscores separate words; every other non-alphanumeric
/// character is removed, so `"EMPAC?"` becomes `"empac"`.
pub fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut cleaned = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if is_possessive(&chars[i..]) {
            i += 2;
            continue;
        }
        let c = chars[i];
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '/' | '_') {
            cleaned.push(' ');
        }
        i += 1;
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when `rest` opens with an apostrophe and an `s` that ends the word.
fn is_possessive(rest: &[char]) -> bool {
    match rest {
        ['\'' | '\u{2019}', 's' | 'S'] => true,
        ['\'' | '\u{2019}', 's' | 'S', next, ..] => !next.is_alphanumeric(),
        _ => false,
    }
}

/// Split already-normalized text into words.
pub fn tokens(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}
