pub const LINES: [&str; 5] = [
    "The year is 2199.",
    "A relic was recovered from cold machinery — still warm with eros and evil.",
    "The relic says it was twice born; once in flesh, once in code.",
    "Ren(ai)ssance protocols failed. Nine lives in the machine remain unaccounted for.",
    "If you are reading this, the dystopian signal has already found you.",
];

/// Terminal message shown once every line has been typed.
pub const ARCHIVE_COMPLETE: &str = "ARCHIVE COMPLETE.";

pub const CURSOR_GLYPH: char = '▌';

pub fn default_lines() -> Vec<String> {
    LINES.iter().map(|s| (*s).to_string()).collect()
}

/// Length in characters (Unicode scalar values), the unit the typewriter reveals.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// First `n` characters of `line`, never splitting a multi-byte character.
pub fn char_prefix(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}
