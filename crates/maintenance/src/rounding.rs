//! Presentation rounding for monetary and score values.
//!
//! Computations and stored documents keep full `f64` precision. Callers that
//! present results (the HTTP API) ask for a rounded copy through [`Rounded`].

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A copy of a result with money and condition scores rounded to two decimals.
///
/// Rates, ratios and coordinates are left untouched.
pub trait Rounded {
    fn rounded(self) -> Self;
}

impl<T: Rounded> Rounded for Vec<T> {
    fn rounded(self) -> Self {
        self.into_iter().map(Rounded::rounded).collect()
    }
}
