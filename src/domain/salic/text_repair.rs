//! Repair of UTF-8 text that was decoded as Windows-1252.
//!
//! SALIC records frequently arrive double-encoded ("integraÃ§Ã£o"). The
//! repair is selective: text is only rewritten when it carries the
//! mojibake signature, so legitimate capital Ã ("SÃO PAULO") survives.

/// Ordered substitutions. Whole-word fixes for the uppercase endings come
/// first, then the general two-character sequences.
const RULES: &[(&str, &str)] = &[
    ("UNIÃƒO", "UNIÃO"),
    ("INTEGRAÃƒO", "INTEGRAÇÃO"),
    ("INTEGRAÃ‡ÃƒO", "INTEGRAÇÃO"),
    ("CELEBRAÃƒO", "CELEBRAÇÃO"),
    ("ÃƒO", "ÃO"),
    ("Ã§Ã£o", "ção"),
    ("Ã¡", "á"),
    ("Ã©", "é"),
    ("Ã\u{ad}", "í"),
    ("Ã³", "ó"),
    ("Ãº", "ú"),
    ("Ã\u{a0}", "à"),
    ("Ãª", "ê"),
    ("Ã´", "ô"),
    ("Ã¢", "â"),
    ("Ã£", "ã"),
    ("Ãµ", "õ"),
    ("Ã§", "ç"),
    ("Ãƒ", "Ã"),
    ("Ã‡", "Ç"),
    ("Ã‰", "É"),
    ("Ã“", "Ó"),
    ("Ãš", "Ú"),
    ("Ã•", "Õ"),
    ("ÃŠ", "Ê"),
];

/// Characters that follow `Ã` only in mis-decoded text.
const SIGNATURE_FOLLOWERS: &[char] = &[
    'ƒ', '‡', '§', '£', '¡', '©', '\u{ad}', '³', 'º', '\u{a0}', 'ª', '´', '¢', 'µ', '‰', '“',
    'š', '•', 'Š',
];

/// True when the text contains at least one mojibake sequence.
pub fn has_mojibake(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == 'Ã' {
            if let Some(next) = chars.peek() {
                if SIGNATURE_FOLLOWERS.contains(next) {
                    return true;
                }
            }
        }
    }
    false
}

/// Repairs mis-decoded text. Text without the signature is returned as is.
pub fn repair_text(text: &str) -> String {
    if !has_mojibake(text) {
        return text.to_string();
    }

    let mut repaired = text.to_string();
    for (broken, fixed) in RULES {
        if repaired.contains(broken) {
            repaired = repaired.replace(broken, fixed);
        }
    }
    clean_text(&repaired)
}

/// Drops control characters, collapses whitespace runs and trims.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
