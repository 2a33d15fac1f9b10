//! Sudoku digit representation.

use std::fmt::{self, Display};

/// A sudoku digit in the range 1-9.
///
/// This enum provides type-safe representation of sudoku digits, preventing
/// invalid values at compile time. Empty cells are modeled as
/// `Option<Digit>` rather than a sentinel digit value.
///
/// # Examples
///
/// ```
/// use solvoku_core::Digit;
///
/// let digit = Digit::new(7).unwrap();
/// assert_eq!(digit, Digit::D7);
/// assert_eq!(digit.value(), 7);
///
/// // Out-of-range values are rejected
/// assert_eq!(Digit::new(0), None);
/// assert_eq!(Digit::new(10), None);
///
/// // Iterate over all digits in ascending order
/// for digit in Digit::ALL {
///     println!("{}", digit);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Digit {
    /// The digit 1.
    D1 = 1,
    /// The digit 2.
    D2 = 2,
    /// The digit 3.
    D3 = 3,
    /// The digit 4.
    D4 = 4,
    /// The digit 5.
    D5 = 5,
    /// The digit 6.
    D6 = 6,
    /// The digit 7.
    D7 = 7,
    /// The digit 8.
    D8 = 8,
    /// The digit 9.
    D9 = 9,
}

impl Digit {
    /// Array containing all digits from 1 to 9 in ascending order.
    ///
    /// The search relies on this order: candidates are always tried
    /// lowest-first, which makes solving deterministic.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// Creates a digit from a `u8` value, returning `None` for values
    /// outside 1-9.
    ///
    /// # Examples
    ///
    /// ```
    /// use solvoku_core::Digit;
    ///
    /// assert_eq!(Digit::new(5), Some(Digit::D5));
    /// assert_eq!(Digit::new(0), None);
    /// ```
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            4 => Some(Self::D4),
            5 => Some(Self::D5),
            6 => Some(Self::D6),
            7 => Some(Self::D7),
            8 => Some(Self::D8),
            9 => Some(Self::D9),
            _ => None,
        }
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the next digit in ascending order, or `None` after [`Digit::D9`].
    ///
    /// # Examples
    ///
    /// ```
    /// use solvoku_core::Digit;
    ///
    /// assert_eq!(Digit::D1.succ(), Some(Digit::D2));
    /// assert_eq!(Digit::D9.succ(), None);
    /// ```
    #[must_use]
    pub const fn succ(self) -> Option<Self> {
        Self::new(self.value() + 1)
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.value()
    }
}
