//! Decoder limits.

/// Default limit on list/dictionary nesting while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied while decoding untrusted input.
///
/// ```
/// use rencode_core::{Decoder, DecoderConfig};
///
/// let cfg = DecoderConfig::default().with_max_depth(2);
/// // [[[]]] nests three deep.
/// let mut decoder = Decoder::with_config(&[193, 193, 192], cfg);
/// assert!(decoder.decode_next().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of containers open at once.
    pub max_depth: usize,
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
