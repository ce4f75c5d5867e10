use std::fmt;

/// Which deserialization pass of a round trip is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTripStage {
    /// The caller-supplied serialized text.
    Baseline,
    /// Text produced by the first serialization.
    Reserialized,
}

impl fmt::Display for RoundTripStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundTripStage::Baseline => write!(f, "baseline"),
            RoundTripStage::Reserialized => write!(f, "re-serialized"),
        }
    }
}

/// Which text comparison of a round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextComparison {
    /// Trimmed first serialization against the trimmed baseline.
    OriginalText,
    /// Second serialization against the third, byte for byte.
    Stability,
}

impl fmt::Display for TextComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextComparison::OriginalText => write!(f, "Original text"),
            TextComparison::Stability => write!(f, "Re-serialization"),
        }
    }
}
