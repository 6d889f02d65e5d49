//! Chinese numerals as they appear in lunar birthdays.

/// Word -> value table. Month aliases (正, 冬, 腊) and the tens words (廿, 卅)
/// share the table with the plain digits.
const NUMERALS: &[(&str, u32)] = &[
    ("零", 0),
    ("〇", 0),
    ("一", 1),
    ("二", 2),
    ("三", 3),
    ("四", 4),
    ("五", 5),
    ("六", 6),
    ("七", 7),
    ("八", 8),
    ("九", 9),
    ("十", 10),
    ("十一", 11),
    ("十二", 12),
    ("正", 1),
    ("冬", 11),
    ("腊", 12),
    ("廿", 20),
    ("卅", 30),
];

/// Look up a whole numeral word, e.g. `"十一"` or `"腊"`.
pub fn lookup(word: &str) -> Option<u32> {
    NUMERALS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, value)| *value)
}

/// Value of a single digit character (0..=9), Chinese or ASCII.
pub fn digit(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let mut buf = [0u8; 4];
    lookup(c.encode_utf8(&mut buf)).filter(|v| *v <= 9)
}
