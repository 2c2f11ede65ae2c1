//! Random token generation for instance identifiers and generated records.

use rand::Rng;

/// Character sets a token can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `A-Z`
    Upper,
    /// `a-z`
    Lower,
    /// `0-9`
    Digits,
    /// `0-9A-Z`, used for instance identifiers.
    UpperDigits,
    /// `0-9a-z`, used for record identifiers.
    LowerDigits,
}

impl Alphabet {
    /// The bytes this alphabet draws from.
    #[must_use]
    pub fn symbols(self) -> &'static [u8] {
        match self {
            Self::Upper => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Lower => b"abcdefghijklmnopqrstuvwxyz",
            Self::Digits => b"0123456789",
            Self::UpperDigits => b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::LowerDigits => b"0123456789abcdefghijklmnopqrstuvwxyz",
        }
    }

    /// Whether `c` belongs to this alphabet.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.symbols().contains(&(c as u8))
    }
}

/// Generate a token of `len` characters drawn uniformly from `alphabet`.
///
/// # Example
///
/// ```
/// use osba::session::token::{random_token, Alphabet};
///
/// let token = random_token(&mut rand::thread_rng(), 8, Alphabet::UpperDigits);
/// assert_eq!(token.len(), 8);
/// ```
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize, alphabet: Alphabet) -> String {
    let symbols = alphabet.symbols();
    (0..len)
        .map(|_| symbols[rng.gen_range(0..symbols.len())] as char)
        .collect()
}
