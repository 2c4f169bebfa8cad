//! # Table Interpolation
//!
//! Straight-line interpolation between tabulated points, as ACI 211.1
//! prescribes for values falling between table columns (strength in Table
//! 6.3.4, fineness modulus in Table 6.3.6).

/// Values within this distance of a tabulated abscissa are treated as
/// landing exactly on it (absorbs float noise such as `2.4 + 0.2 + 0.2`).
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Where a value falls relative to a strictly increasing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// On the grid point at this index
    Exact(usize),
    /// Strictly between grid points `i` and `i + 1`
    Between(usize),
    /// Below the first grid point
    Below,
    /// Above the last grid point
    Above,
}

/// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
///
/// # Formula
/// y = y0 + (x - x0)(y1 - y0) / (x1 - x0)
///
/// # Example
/// ```rust
/// use mix_core::equations::interpolation::linear_interpolate;
///
/// // Halfway between 4000 psi (0.57) and 5000 psi (0.48)
/// let wc = linear_interpolate(4500.0, 4000.0, 5000.0, 0.57, 0.48);
/// assert!((wc - 0.525).abs() < 1e-9);
/// ```
#[inline]
pub fn linear_interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Locate `x` on a strictly increasing, non-empty grid.
pub fn bracket(grid: &[f64], x: f64) -> Bracket {
    if let Some(i) = grid.iter().position(|&g| (g - x).abs() <= GRID_TOLERANCE) {
        return Bracket::Exact(i);
    }

    match (grid.first(), grid.last()) {
        (Some(&first), _) if x < first => Bracket::Below,
        (_, Some(&last)) if x > last => Bracket::Above,
        _ => grid
            .windows(2)
            .position(|w| x > w[0] && x < w[1])
            .map(Bracket::Between)
            .unwrap_or(Bracket::Below),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FM_GRID: [f64; 4] = [2.4, 2.6, 2.8, 3.0];

    #[test]
    fn test_linear_interpolate_endpoints() {
        assert_eq!(linear_interpolate(2.6, 2.6, 2.8, 0.64, 0.62), 0.64);
        assert!((linear_interpolate(2.8, 2.6, 2.8, 0.64, 0.62) - 0.62).abs() < 1e-12);
    }

    #[test]
    fn test_bracket_exact_with_float_noise() {
        // 2.4 + 0.2 + 0.2 is not bit-equal to 2.8
        assert_eq!(bracket(&FM_GRID, 2.4 + 0.2 + 0.2), Bracket::Exact(2));
        assert_eq!(bracket(&FM_GRID, 2.4), Bracket::Exact(0));
        assert_eq!(bracket(&FM_GRID, 3.0), Bracket::Exact(3));
    }

    #[test]
    fn test_bracket_between() {
        assert_eq!(bracket(&FM_GRID, 2.5), Bracket::Between(0));
        assert_eq!(bracket(&FM_GRID, 2.7), Bracket::Between(1));
        assert_eq!(bracket(&FM_GRID, 2.95), Bracket::Between(2));
    }

    #[test]
    fn test_bracket_out_of_range() {
        assert_eq!(bracket(&FM_GRID, 2.0), Bracket::Below);
        assert_eq!(bracket(&FM_GRID, 3.2), Bracket::Above);
    }
}
