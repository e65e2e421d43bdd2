//! Short code generation and validation utilities.
//!
//! A code is 6 to 8 ASCII letters or digits. Case is significant: `abc123` and
//! `ABC123` are different codes.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Shortest accepted code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Returns true iff `code` satisfies the lexical contract.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("abc123"));
/// assert!(is_valid_code("ABCdef12"));
///
/// assert!(!is_valid_code("abc12"));     // Too short
/// assert!(!is_valid_code("abc-123"));   // Hyphen
/// assert!(!is_valid_code("abcdéf12"));  // Non-ASCII
/// ```
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Random code generator.
///
/// Stateless apart from its configured length. Draws from `[A-Za-z0-9]` using
/// the thread-local CSPRNG, so with 8 characters there are 62^8 possible codes.
/// Collisions are possible and are resolved by the caller, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// Returns `None` if `length` falls outside the accepted code lengths.
    pub fn new(length: usize) -> Option<Self> {
        (MIN_CODE_LENGTH..=MAX_CODE_LENGTH)
            .contains(&length)
            .then_some(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Produces a candidate code.
    pub fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}
