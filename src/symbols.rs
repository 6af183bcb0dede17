//! The fixed symbol pool and its bitmask layout.
//!
//! Bits 0..=25 are the Latin letters `a`..=`z`; bits 26..=49 are the Greek
//! pool below, in order. The layout is part of the output format and must
//! not change.

/// The escaped-name keyword introducing a fraction.
pub const KEYWORD_FRAC: &str = "frac";

/// The 24 recognized Greek names, in bit order.
///
/// `lota` is the historical spelling carried by the symbol table; it is kept
/// verbatim so masks stay compatible.
pub const GREEK_POOL: [&str; 24] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    "lota", "kappa", "lambda", "mu", "nu", "xi", "omicron", "pi", "rho",
    "sigma", "tau", "upsilon", "phi", "chi", "psi", "omega",
];

/// First Greek bit position.
pub const GREEK_BASE: u32 = 26;

/// A single-symbol mask for a bare Latin letter.
pub fn latin_mask(letter: char) -> Option<u64> {
    if letter.is_ascii_lowercase() {
        Some(1 << (letter as u32 - 'a' as u32))
    } else {
        None
    }
}

/// A single-symbol mask for a Greek name (without the leading backslash).
pub fn greek_mask(name: &str) -> Option<u64> {
    GREEK_POOL
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| 1 << (GREEK_BASE + index as u32))
}

pub fn is_greek(name: &str) -> bool { greek_mask(name).is_some() }

/// Render every set bit of `mask` in canonical order: Latin letters first,
/// then Greek names with their escape marker.
pub fn append_symbols(mask: u64, out: &mut String) {
    for bit in 0..GREEK_BASE {
        if mask & (1 << bit) != 0 {
            out.push((b'a' + bit as u8) as char);
        }
    }

    for (index, name) in GREEK_POOL.iter().enumerate() {
        if mask & (1 << (GREEK_BASE + index as u32)) != 0 {
            out.push('\\');
            out.push_str(name);
        }
    }
}
