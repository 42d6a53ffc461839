//! Station name cleanup for the metrics backend, which only accepts ASCII
//! dimension values.

const REPLACEMENTS: [(&str, &str); 7] = [
    ("á", "a"),
    ("é", "e"),
    ("í", "i"),
    ("ó", "o"),
    ("ú", "u"),
    ("ü", "u"),
    ("#", "No. "),
];

/// Replace the accented vowels seen in SIATA station names and expand `#`.
///
/// Any other non-ASCII character (`ñ`, uppercase accents, ...) is left as is.
pub fn ascii_name(name: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to))
}
