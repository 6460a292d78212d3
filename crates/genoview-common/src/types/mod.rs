//! Genomic coordinate types shared across Genoview
//!
//! Positions are chromosome-relative and 1-based inclusive unless stated
//! otherwise. The UCSC sequence API is the one place that speaks 0-based
//! half-open coordinates; [`SequenceRange::to_upstream`] does that conversion.

use crate::error::{GenoviewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest window (in bp) that may be requested from the sequence API.
pub const MAX_VIEW_RANGE: u64 = 10_000;

// ============================================================================
// Gene bounds
// ============================================================================

/// Minimum and maximum coordinate spanned by a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneBounds {
    pub min: u64,
    pub max: u64,
}

impl GeneBounds {
    /// Build bounds from two coordinates arriving in either order.
    ///
    /// NCBI reports `chrstart > chrstop` for genes on the reverse strand, so
    /// the order of the inputs carries no meaning here.
    pub fn from_unordered(a: u64, b: u64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Distance between the bounds (`max - min`), zero if they are inverted
    pub fn span(&self) -> u64 {
        self.max.saturating_sub(self.min)
    }

    /// Number of bases covered, both ends included
    pub fn length_bp(&self) -> u64 {
        self.span() + 1
    }

    pub fn contains(&self, position: u64) -> bool {
        position >= self.min && position <= self.max
    }
}

impl fmt::Display for GeneBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} bp)",
            format_position(self.min),
            format_position(self.max),
            format_position(self.length_bp())
        )
    }
}

// ============================================================================
// Sequence ranges
// ============================================================================

/// A 1-based inclusive window on a chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRange {
    pub start: u64,
    pub end: u64,
}

impl SequenceRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// `end - start`, the quantity capped by [`MAX_VIEW_RANGE`]
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Default window shown for a gene: the whole gene when it fits in
    /// [`MAX_VIEW_RANGE`], otherwise the first [`MAX_VIEW_RANGE`] bp from `min`.
    pub fn initial_window(bounds: &GeneBounds) -> Self {
        let end = if bounds.span() > MAX_VIEW_RANGE {
            bounds.min + MAX_VIEW_RANGE
        } else {
            bounds.max
        };

        Self {
            start: bounds.min,
            end,
        }
    }

    /// Convert to the upstream 0-based half-open `[start - 1, end)` pair.
    pub fn to_upstream(&self) -> (u64, u64) {
        (self.start.saturating_sub(1), self.end)
    }

    /// Check the window against the request cap.
    pub fn ensure_within_view_limit(&self) -> Result<()> {
        if self.span() > MAX_VIEW_RANGE {
            return Err(GenoviewError::InvalidRange(format!(
                "{}-{} spans {} bp, the maximum view range is {} bp",
                self.start,
                self.end,
                format_position(self.span()),
                format_position(MAX_VIEW_RANGE)
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SequenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_position(self.start),
            format_position(self.end)
        )
    }
}

// ============================================================================
// Nucleotides
// ============================================================================

/// One of the four DNA bases accepted as a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'C' => Some(Self::C),
            'G' => Some(Self::G),
            'T' => Some(Self::T),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }
}

impl FromStr for Nucleotide {
    type Err = GenoviewError;

    /// Accepts exactly one uppercase base. Callers that take free-form input
    /// uppercase it first.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| GenoviewError::InvalidNucleotide(s.to_string()))
            },
            _ => Err(GenoviewError::InvalidNucleotide(s.to_string())),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ============================================================================
// Strand
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse the `+`/`-` marker used by NCBI. Anything else is unknown.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }
}

// ============================================================================
// Position formatting
// ============================================================================

/// Format a coordinate with `,` thousands separators (`43044295` → `43,044,295`).
pub fn format_position(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Parse a user-typed or display-formatted position, ignoring `,` separators
/// and surrounding whitespace.
pub fn parse_position(text: &str) -> Result<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(GenoviewError::InvalidPosition(text.to_string()));
    }

    cleaned
        .parse::<u64>()
        .map_err(|_| GenoviewError::InvalidPosition(text.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_are_order_independent() {
        let bounds = GeneBounds::from_unordered(500, 100);
        assert_eq!(bounds, GeneBounds { min: 100, max: 500 });
        assert_eq!(GeneBounds::from_unordered(100, 500), bounds);
        assert_eq!(bounds.length_bp(), 401);
        assert!(bounds.contains(100));
        assert!(bounds.contains(500));
        assert!(!bounds.contains(501));
    }

    #[test]
    fn test_inverted_bounds_have_zero_span() {
        let bounds = GeneBounds { min: 10, max: 5 };
        assert_eq!(bounds.span(), 0);
        assert_eq!(bounds.length_bp(), 1);
    }

    #[test]
    fn test_initial_window_clips_large_genes() {
        let bounds = GeneBounds::from_unordered(1_000_000, 1_050_000);
        let window = SequenceRange::initial_window(&bounds);
        assert_eq!(window, SequenceRange::new(1_000_000, 1_010_000));
    }

    #[test]
    fn test_initial_window_keeps_small_genes() {
        let bounds = GeneBounds::from_unordered(2_000, 7_000);
        let window = SequenceRange::initial_window(&bounds);
        assert_eq!(window, SequenceRange::new(2_000, 7_000));
    }

    #[test]
    fn test_initial_window_at_exact_limit() {
        let bounds = GeneBounds::from_unordered(1, 10_001);
        let window = SequenceRange::initial_window(&bounds);
        assert_eq!(window, SequenceRange::new(1, 10_001));
    }

    #[test]
    fn test_to_upstream() {
        assert_eq!(SequenceRange::new(1000, 2000).to_upstream(), (999, 2000));
        assert_eq!(SequenceRange::new(0, 10).to_upstream(), (0, 10));
    }

    #[test]
    fn test_view_limit() {
        assert!(SequenceRange::new(1, 10_001).ensure_within_view_limit().is_ok());
        let err = SequenceRange::new(1, 10_002)
            .ensure_within_view_limit()
            .unwrap_err();
        assert!(err.to_string().contains("10,000"));
    }

    #[test]
    fn test_nucleotide_from_str() {
        assert_eq!("A".parse::<Nucleotide>().unwrap(), Nucleotide::A);
        assert_eq!("T".parse::<Nucleotide>().unwrap(), Nucleotide::T);
        assert!("a".parse::<Nucleotide>().is_err());
        assert!("N".parse::<Nucleotide>().is_err());
        assert!("AC".parse::<Nucleotide>().is_err());
        assert!("".parse::<Nucleotide>().is_err());
    }

    #[test]
    fn test_strand_from_symbol() {
        assert_eq!(Strand::from_symbol("-"), Some(Strand::Reverse));
        assert_eq!(Strand::from_symbol("+"), Some(Strand::Forward));
        assert_eq!(Strand::from_symbol("?"), None);
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(0), "0");
        assert_eq!(format_position(999), "999");
        assert_eq!(format_position(1000), "1,000");
        assert_eq!(format_position(43_044_295), "43,044,295");
        assert_eq!(format_position(100_000), "100,000");
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("43,044,295").unwrap(), 43_044_295);
        assert_eq!(parse_position(" 1200 ").unwrap(), 1200);
        assert!(parse_position("").is_err());
        assert!(parse_position("12a").is_err());
        assert!(parse_position("-5").is_err());
    }

    #[test]
    fn test_bounds_display() {
        let bounds = GeneBounds::from_unordered(43_125_483, 43_044_295);
        assert_eq!(bounds.to_string(), "43,044,295 - 43,125,483 (81,189 bp)");
    }

    proptest! {
        #[test]
        fn prop_bounds_min_never_exceeds_max(a in 0u64..4_000_000_000, b in 0u64..4_000_000_000) {
            let bounds = GeneBounds::from_unordered(a, b);
            prop_assert!(bounds.min <= bounds.max);
        }

        #[test]
        fn prop_initial_window_fits_view_limit(a in 1u64..300_000_000, len in 0u64..2_000_000) {
            let bounds = GeneBounds::from_unordered(a, a + len);
            let window = SequenceRange::initial_window(&bounds);
            prop_assert!(window.span() <= MAX_VIEW_RANGE);
            prop_assert_eq!(window.start, bounds.min);
            prop_assert!(window.end <= bounds.max);
        }

        #[test]
        fn prop_formatted_positions_parse_back(value in 0u64..u64::MAX / 2) {
            prop_assert_eq!(parse_position(&format_position(value)).unwrap(), value);
        }
    }
}
