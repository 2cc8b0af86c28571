// TiltMorse — Morse Alphabet

/// Returned by [`decode`] for patterns outside the table.
pub const UNKNOWN: char = '?';

/// International Morse code for A–Z and 0–9.
pub static MORSE_TABLE: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

/// Pattern for one character; ASCII letters are matched case-insensitively.
pub fn encode_char(c: char) -> Option<&'static str> {
    let c = c.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, pattern)| *pattern)
}

pub fn decode(pattern: &str) -> char {
    MORSE_TABLE
        .iter()
        .find(|(_, p)| *p == pattern)
        .map(|(letter, _)| *letter)
        .unwrap_or(UNKNOWN)
}
