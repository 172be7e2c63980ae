//! Text repair and comparison keys for patient and maternity names.
//!
//! Exports reach us after at least one round of "UTF-8 bytes read as
//! Latin-1/Windows-1252", so `JOÃƒO` and `ConceiÃ§Ã£o` are common. Repair
//! works on the two-character sequences such a round produces.

/// Decoded form of the second character of a `Ã?` sequence.
fn repair_after_a_tilde(next: char) -> Option<char> {
    let repaired = match next {
        // Windows-1252 reading of the upper-case letters.
        '€' => 'À',
        '\u{81}' => 'Á',
        '‚' => 'Â',
        'ƒ' => 'Ã',
        '„' => 'Ä',
        '‡' => 'Ç',
        'ˆ' => 'È',
        '‰' => 'É',
        'Š' => 'Ê',
        '\u{8d}' => 'Í',
        '“' => 'Ó',
        '”' => 'Ô',
        '•' => 'Õ',
        '–' => 'Ö',
        'š' => 'Ú',
        'œ' => 'Ü',
        // Latin-1 reading of the same bytes.
        '\u{80}' => 'À',
        '\u{82}' => 'Â',
        '\u{83}' => 'Ã',
        '\u{87}' => 'Ç',
        '\u{89}' => 'É',
        '\u{8a}' => 'Ê',
        '\u{93}' => 'Ó',
        '\u{94}' => 'Ô',
        '\u{95}' => 'Õ',
        '\u{9a}' => 'Ú',
        // Lower-case letters read the same way in both code pages.
        '\u{a0}' => 'à',
        '¡' => 'á',
        '¢' => 'â',
        '£' => 'ã',
        '¤' => 'ä',
        '§' => 'ç',
        '¨' => 'è',
        '©' => 'é',
        'ª' => 'ê',
        '\u{ad}' => 'í',
        '±' => 'ñ',
        '³' => 'ó',
        '´' => 'ô',
        'µ' => 'õ',
        '¶' => 'ö',
        'º' => 'ú',
        '¼' => 'ü',
        _ => return None,
    };
    Some(repaired)
}

/// Decoded form of the second character of a `Â?` sequence.
fn repair_after_a_circumflex(next: char) -> Option<char> {
    match next {
        'º' => Some('º'),
        'ª' => Some('ª'),
        '°' => Some('°'),
        '\u{a0}' => Some(' '),
        _ => None,
    }
}

fn repair_pass(text: &str) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let repaired = match (ch, chars.peek().copied()) {
            ('Ã', Some(next)) => repair_after_a_tilde(next),
            ('Â', Some(next)) => repair_after_a_circumflex(next),
            _ => None,
        };
        match repaired {
            Some(fixed) => {
                out.push(fixed);
                chars.next();
                changed = true;
            }
            None => out.push(ch),
        }
    }
    (out, changed)
}

/// Repairs mis-decoded accented letters.
///
/// Every repair shortens the text, so repeating until nothing changes always
/// terminates, and the result is a fixpoint: applying this twice equals
/// applying it once. Text without artifacts comes back unchanged.
pub fn fix_mojibake(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let (next, changed) = repair_pass(&current);
        if !changed {
            return current;
        }
        current = next;
    }
}

fn strip_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Removes accents from Latin letters, leaving everything else in place.
pub fn strip_diacritics(text: &str) -> String {
    text.chars().map(strip_diacritic).collect()
}

/// Builds the comparison key of a name: repaired, accent-free, single-spaced
/// and upper-cased. `" Conceiçao  da  Silva"` becomes `"CONCEICAO DA SILVA"`.
pub fn normalize_name(text: &str) -> String {
    let repaired = fix_mojibake(text);
    let stripped = strip_diacritics(&repaired);
    let mut normalized = String::with_capacity(stripped.len());
    for part in stripped.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    normalized.to_uppercase()
}

/// Creates a compact key by keeping only upper-case alphanumeric characters.
pub fn compact_key(text: &str) -> String {
    normalize_name(text)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_lower_case_sequences() {
        assert_eq!(fix_mojibake("ConceiÃ§Ã£o"), "Conceição");
        assert_eq!(fix_mojibake("JosÃ©"), "José");
    }

    #[test]
    fn repairs_double_encoded_upper_case() {
        assert_eq!(fix_mojibake("JOÃƒO"), "JOÃO");
    }

    #[test]
    fn keeps_genuine_a_tilde() {
        assert_eq!(fix_mojibake("IRMÃ MARIA"), "IRMÃ MARIA");
        assert_eq!(fix_mojibake("SÃO"), "SÃO");
    }

    #[test]
    fn compact_key_drops_punctuation() {
        assert_eq!(compact_key("Notre-Care"), "NOTRECARE");
    }
}
