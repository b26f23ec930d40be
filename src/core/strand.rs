//! Strand orientation and strand combination policy
//!
//! Tracks may carry a strand per element. When two elements collapse into
//! one during a union, their strands are combined through a configurable
//! policy.

/// Strand orientation of one element
///
/// `Missing` corresponds to the '.' strand of tabular track formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Missing,
}

impl Strand {
    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use trackops::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), Some(Strand::Missing));
    /// assert_eq!(Strand::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            '.' => Some(Strand::Missing),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Missing => '.',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Policy for combining the strands of a merge group
///
/// Conflicting strands resolve to `Missing` unless
/// `treat_missing_as_negative` is set, in which case a missing strand is
/// read as `Minus` before the comparison (so missing-vs-minus resolves to
/// minus, and missing-vs-plus remains a conflict).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrandPolicy {
    pub use_strands: bool,
    pub treat_missing_as_negative: bool,
}

impl Default for StrandPolicy {
    fn default() -> Self {
        StrandPolicy {
            use_strands: true,
            treat_missing_as_negative: false,
        }
    }
}

impl StrandPolicy {
    /// The strand a given element contributes under this policy
    pub fn effective(&self, strand: Strand) -> Strand {
        if self.treat_missing_as_negative && strand == Strand::Missing {
            Strand::Minus
        } else {
            strand
        }
    }

    /// Combine two contributing strands
    pub fn combine(&self, a: Strand, b: Strand) -> Strand {
        let (a, b) = (self.effective(a), self.effective(b));
        if a == b {
            a
        } else {
            Strand::Missing
        }
    }

    /// Fold the strands of a whole merge group
    pub fn fold<I: IntoIterator<Item = Strand>>(&self, strands: I) -> Strand {
        let mut it = strands.into_iter();
        let first = match it.next() {
            Some(s) => self.effective(s),
            None => return Strand::Missing,
        };
        it.fold(first, |acc, s| self.combine(acc, s))
    }
}
