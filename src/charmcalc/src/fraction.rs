//! Rational display of small probabilities
//!
//! Probabilities render as `1/N` wherever that is close enough, and as the
//! best rational approximation under a denominator bound otherwise.

use serde::Serialize;

/// Default denominator bound for [`decimal_to_fraction_default`]
pub const DEFAULT_MAX_DENOMINATOR: u64 = 100_000_000;

/// Largest denominator a collapsed reciprocal may show
pub const MAX_RECIPROCAL_DENOMINATOR: u64 = 99_999_999;

/// Best approximations with a denominator above this collapse to `1/N`
const COLLAPSE_DENOMINATOR: u64 = 100;

const RECIPROCAL_TOLERANCE: f64 = 1e-8;

const MAX_MEDIANT_STEPS: usize = 128;

/// A non-negative fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator: denominator.max(1),
        }
    }

    pub fn reciprocal(denominator: u64) -> Self {
        Self::new(1, denominator)
    }

    /// Divide out the greatest common divisor
    pub fn reduced(self) -> Self {
        if self.numerator == 0 {
            return Self::ZERO;
        }
        let divisor = gcd(self.numerator, self.denominator);
        Self::new(self.numerator / divisor, self.denominator / divisor)
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Display approximation of `x` with denominator at most `max_denominator`.
    ///
    /// Never fails: non-finite and non-positive input yields [`Fraction::ZERO`].
    pub fn approximate(x: f64, max_denominator: u64) -> Self {
        if !x.is_finite() || x <= 0.0 {
            return Self::ZERO;
        }
        if x >= 1.0 {
            return Self::new(x.round() as u64, 1);
        }

        let max_denominator = max_denominator.max(1);
        let inverse = (1.0 / x).round();
        if inverse <= max_denominator as f64 {
            let n = inverse as u64;
            if (x - 1.0 / n as f64).abs() <= RECIPROCAL_TOLERANCE {
                return Self::reciprocal(n);
            }
        }

        let best = mediant_search(x, max_denominator);
        if best.numerator == 0 || best.denominator > COLLAPSE_DENOMINATOR {
            let n = inverse as u64;
            let n = if (1..=MAX_RECIPROCAL_DENOMINATOR).contains(&n) {
                n
            } else {
                MAX_RECIPROCAL_DENOMINATOR
            };
            return Self::reciprocal(n);
        }
        best.reduced()
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.numerator == 0 {
            return write!(f, "0");
        }
        write!(f, "{}/{}", self.numerator, group_thousands(self.denominator))
    }
}

/// Format `x` as `"num/den"`, or `"0"` for degenerate input
pub fn decimal_to_fraction(x: f64, max_denominator: u64) -> String {
    Fraction::approximate(x, max_denominator).to_string()
}

pub fn decimal_to_fraction_default(x: f64) -> String {
    decimal_to_fraction(x, DEFAULT_MAX_DENOMINATOR)
}

/// Insert `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Stern-Brocot walk between 0/1 and 1/1 for `0 < x < 1`.
///
/// Consecutive moves in one direction are taken together, so the walk
/// needs at most one step per continued fraction term.
fn mediant_search(x: f64, max_denominator: u64) -> Fraction {
    let (mut lo_n, mut lo_d) = (0u64, 1u64);
    let (mut hi_n, mut hi_d) = (1u64, 1u64);
    let error = |n: u64, d: u64| (n as f64 / d as f64 - x).abs();

    let mut best = if error(lo_n, lo_d) <= error(hi_n, hi_d) {
        Fraction::new(lo_n, lo_d)
    } else {
        Fraction::new(hi_n, hi_d)
    };
    let consider = |n: u64, d: u64, best: &mut Fraction| {
        if error(n, d) < error(best.numerator, best.denominator) {
            *best = Fraction::new(n, d);
        }
    };

    for _ in 0..MAX_MEDIANT_STEPS {
        let (mid_n, mid_d) = (lo_n + hi_n, lo_d + hi_d);
        if mid_d > max_denominator {
            break;
        }
        let mid = mid_n as f64 / mid_d as f64;

        if mid == x {
            best = Fraction::new(mid_n, mid_d);
            break;
        }

        if mid < x {
            // lo + k * hi stays below x
            let cap = (max_denominator - lo_d) / hi_d;
            let below = |k: u64| ((lo_n + k * hi_n) as f64) / ((lo_d + k * hi_d) as f64) <= x;
            let estimate = (x * lo_d as f64 - lo_n as f64) / (hi_n as f64 - x * hi_d as f64);
            let mut k = (estimate as u64).clamp(1, cap.max(1));
            while k > 1 && !below(k) {
                k -= 1;
            }
            while k < cap && below(k + 1) {
                k += 1;
            }
            lo_n += k * hi_n;
            lo_d += k * hi_d;
            consider(lo_n, lo_d, &mut best);
        } else {
            // hi + k * lo stays above x
            let cap = (max_denominator - hi_d) / lo_d;
            let above = |k: u64| ((hi_n + k * lo_n) as f64) / ((hi_d + k * lo_d) as f64) >= x;
            let estimate = (hi_n as f64 - x * hi_d as f64) / (x * lo_d as f64 - lo_n as f64);
            let mut k = (estimate as u64).clamp(1, cap.max(1));
            while k > 1 && !above(k) {
                k -= 1;
            }
            while k < cap && above(k + 1) {
                k += 1;
            }
            hi_n += k * lo_n;
            hi_d += k * lo_d;
            consider(hi_n, hi_d, &mut best);
        }

        if error(best.numerator, best.denominator) == 0.0 {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reciprocals() {
        assert_eq!(decimal_to_fraction_default(0.5), "1/2");
        assert_eq!(decimal_to_fraction_default(0.01), "1/100");
        assert_eq!(decimal_to_fraction_default(0.125), "1/8");
        assert_eq!(decimal_to_fraction_default(1.0 / 53280.0), "1/53,280");
    }

    #[test]
    fn test_mediant_search() {
        assert_eq!(decimal_to_fraction_default(0.3), "3/10");
        assert_eq!(decimal_to_fraction_default(0.75), "3/4");
        assert_eq!(decimal_to_fraction_default(2.0 / 3.0), "2/3");
        assert_eq!(decimal_to_fraction_default(0.45), "9/20");
    }

    #[test]
    fn test_large_denominator_collapses() {
        // 123/10000 would be exact; it collapses to the nearest reciprocal
        assert_eq!(decimal_to_fraction_default(0.0123), "1/81");
        assert_eq!(decimal_to_fraction_default(1e-12), "1/99,999,999");
    }

    #[test]
    fn test_small_bound() {
        assert_eq!(decimal_to_fraction(0.3, 5), "1/3");
        assert_eq!(decimal_to_fraction(0.3, 2), "1/2");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(decimal_to_fraction_default(0.0), "0");
        assert_eq!(decimal_to_fraction_default(-1.0), "0");
        assert_eq!(decimal_to_fraction_default(f64::NAN), "0");
        assert_eq!(decimal_to_fraction_default(f64::INFINITY), "0");
        assert_eq!(decimal_to_fraction_default(1.0), "1/1");
        assert_eq!(decimal_to_fraction_default(1.6), "2/1");
    }

    #[test]
    fn test_reduced() {
        assert_eq!(Fraction::new(6, 8).reduced(), Fraction::new(3, 4));
        assert_eq!(Fraction::new(0, 8).reduced(), Fraction::ZERO);
        assert_eq!(Fraction::new(3, 1_234_567).to_string(), "3/1,234,567");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(99_999_999), "99,999,999");
    }
}
