//! Short code generation.
//!
//! Codes are drawn character by character, uniformly and independently, from a
//! fixed alphabet using a cryptographically secure generator. Codes double as
//! unguessable identifiers, so a predictable PRNG is not acceptable here.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::code_source::CodeSource;

/// Default code alphabet: lowercase ASCII letters and digits (36 symbols).
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Default code length. 36^6 gives roughly 2.2 billion codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would be shadowed by fixed routes and must never be issued.
pub const RESERVED_CODES: &[&str] = &["api", "health", "shorten", "v1"];

/// Errors raised when a generator is configured with unusable parameters.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeGeneratorError {
    #[error("Code alphabet must contain at least 2 distinct characters")]
    AlphabetTooSmall,

    #[error("Code alphabet contains duplicate character '{0}'")]
    DuplicateCharacter(char),

    #[error("Code alphabet may only contain ASCII letters and digits, got '{0}'")]
    UnsafeCharacter(char),

    #[error("Code length must be greater than 0")]
    ZeroLength,
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Checks that an alphabet is usable for code generation.
///
/// # Errors
///
/// Returns [`CodeGeneratorError`] if the alphabet has fewer than two symbols,
/// repeats a symbol, or contains anything other than ASCII letters and digits.
pub fn validate_alphabet(alphabet: &str) -> Result<(), CodeGeneratorError> {
    let mut seen = Vec::with_capacity(alphabet.len());

    for c in alphabet.chars() {
        if !c.is_ascii_alphanumeric() {
            return Err(CodeGeneratorError::UnsafeCharacter(c));
        }
        if seen.contains(&c) {
            return Err(CodeGeneratorError::DuplicateCharacter(c));
        }
        seen.push(c);
    }

    if seen.len() < 2 {
        return Err(CodeGeneratorError::AlphabetTooSmall);
    }

    Ok(())
}

/// Random short code generator backed by [`StdRng`] (ChaCha, seeded from the OS).
///
/// The generator is shared between concurrent requests; the mutex is held only
/// while the characters of one code are drawn.
pub struct RandomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGeneratorError`] if the alphabet or length is unusable.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, CodeGeneratorError> {
        Self::with_rng(alphabet, length, StdRng::from_os_rng())
    }

    /// Creates a generator with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGeneratorError`] if the alphabet or length is unusable.
    pub fn with_rng(
        alphabet: &str,
        length: usize,
        rng: StdRng,
    ) -> Result<Self, CodeGeneratorError> {
        validate_alphabet(alphabet)?;

        if length == 0 {
            return Err(CodeGeneratorError::ZeroLength);
        }

        Ok(Self {
            alphabet: alphabet.chars().collect(),
            length,
            rng: Mutex::new(rng),
        })
    }

    /// Length of every generated code.
    pub fn code_length(&self) -> usize {
        self.length
    }
}

impl CodeSource for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}
