// The canonical Sigil code page.
//
// Base-conversion words map digit values through this table, so its order is
// part of the language's binary/textual compatibility surface: encoded
// programs and `to-base` output only survive round trips if every
// implementation reproduces it verbatim. Never reorder or substitute symbols.

use std::sync::OnceLock;

// RUST CONCEPT: 255 distinct symbols, index = digit value 0..254
// Layout, in order:
//   0..9    ASCII digits
//   10..35  uppercase A-Z
//   36..61  lowercase a-z
//   62..94  remaining printable ASCII (space through ~, ASCII order)
//   95..188 Latin-1 supplement U+00A1..U+00FF, minus the soft hyphen U+00AD
//   189..213 Greek minuscule alpha..omega (with final sigma)
//   214..237 Greek majuscule Alpha..Omega
//   238..243 arrows
//   244..254 math symbols
// The first 62 entries match conventional base-62 digits, so small bases
// read the way programmers expect.
pub const CODE_PAGE: &str = concat!(
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijkl",
    "mnopqrstuvwxyz !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~¡",
    "¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾¿ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒ",
    "ÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷øùúûüýþÿαβγ",
    "δεζηθικλμνξοπρςστυφχψωΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ←↑",
    "→↓↔↕√∞≈≠≤≥∑∏∫∂∇",
);

/// Number of symbols in the canonical alphabet (and the largest digit + 1).
pub const CODE_PAGE_LEN: usize = 255;

fn table() -> &'static [char] {
    static TABLE: OnceLock<Vec<char>> = OnceLock::new();
    TABLE.get_or_init(|| CODE_PAGE.chars().collect())
}

/// The symbol for digit value `d`, or `None` past the end of the table.
pub fn digit_char(d: usize) -> Option<char> {
    table().get(d).copied()
}

/// The digit value of `c`, or `None` for symbols outside the code page.
pub fn char_digit(c: char) -> Option<usize> {
    table().iter().position(|&sym| sym == c)
}
