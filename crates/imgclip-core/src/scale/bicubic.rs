//! Bicubic interpolation by fitting a patch to the 4x4 neighbourhood.
//!
//! For each channel the 16 samples `p[m][n]` (rows `r-1..=r+2`, columns
//! `c-1..=c+2`) determine the coefficients of
//!
//! ```text
//! f(x, y) = Σ a[i][j] · x^i · y^j      i, j ∈ 0..4
//! ```
//!
//! via the closed form `a = C · p · Cᵀ`, where `C` is the Catmull-Rom basis.
//! The patch is evaluated at `x = v` (row fraction), `y = u` (column fraction).

use super::{to_channel, SampleGrid};
use crate::raster::CHANNELS;

/// Catmull-Rom basis, rows are the coefficients of `1, t, t², t³`.
const BASIS: [[f64; 4]; 4] = [
    [0.0, 1.0, 0.0, 0.0],
    [-0.5, 0.0, 0.5, 0.0],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 1.5, -1.5, 0.5],
];

/// Coefficients of one bicubic patch.
struct Patch {
    a: [[f64; 4]; 4],
}

impl Patch {
    fn fit(p: &[[f64; 4]; 4]) -> Self {
        // t = C · p
        let mut t = [[0.0; 4]; 4];
        for (i, t_row) in t.iter_mut().enumerate() {
            for (l, t_val) in t_row.iter_mut().enumerate() {
                *t_val = (0..4).map(|k| BASIS[i][k] * p[k][l]).sum();
            }
        }

        // a = t · Cᵀ
        let mut a = [[0.0; 4]; 4];
        for (i, a_row) in a.iter_mut().enumerate() {
            for (j, a_val) in a_row.iter_mut().enumerate() {
                *a_val = (0..4).map(|l| t[i][l] * BASIS[j][l]).sum();
            }
        }

        Self { a }
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        let ys = [1.0, y, y * y, y * y * y];
        let mut x_pow = 1.0;
        let mut sum = 0.0;
        for row in &self.a {
            let poly: f64 = row.iter().zip(ys).map(|(a, yp)| a * yp).sum();
            sum += poly * x_pow;
            x_pow *= x;
        }
        sum
    }
}

pub(super) fn scale(src: &[u8], dst: &mut [u8], grid: &SampleGrid) {
    let mut offsets = [[0usize; 4]; 4];
    let mut samples = [[0.0f64; 4]; 4];

    for (dst_row, out_row) in dst.chunks_exact_mut(grid.dst_stride()).enumerate() {
        let (src_row, v) = grid.row(dst_row);

        for (dst_col, out) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
            let (src_col, u) = grid.column(dst_col);

            for (m, offset_row) in offsets.iter_mut().enumerate() {
                for (n, offset) in offset_row.iter_mut().enumerate() {
                    *offset = grid.clamped_offset(
                        src_row as isize + m as isize - 1,
                        src_col as isize + n as isize - 1,
                    );
                }
            }

            for c in 0..CHANNELS {
                for (sample_row, offset_row) in samples.iter_mut().zip(&offsets) {
                    for (sample, offset) in sample_row.iter_mut().zip(offset_row) {
                        *sample = src[offset + c] as f64;
                    }
                }
                out[c] = to_channel(Patch::fit(&samples).evaluate(v, u));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_from(f: impl Fn(usize, usize) -> f64) -> Patch {
        let mut p = [[0.0; 4]; 4];
        for (m, row) in p.iter_mut().enumerate() {
            for (n, v) in row.iter_mut().enumerate() {
                *v = f(m, n);
            }
        }
        Patch::fit(&p)
    }

    #[test]
    fn test_patch_interpolates_centre_samples() {
        let patch = patch_from(|m, n| (m * 10 + n) as f64);
        assert!((patch.evaluate(0.0, 0.0) - 11.0).abs() < 1e-9);
        assert!((patch.evaluate(1.0, 0.0) - 21.0).abs() < 1e-9);
        assert!((patch.evaluate(0.0, 1.0) - 12.0).abs() < 1e-9);
        assert!((patch.evaluate(1.0, 1.0) - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_patch_reproduces_linear_ramp() {
        // Catmull-Rom reproduces linear functions exactly
        let patch = patch_from(|m, n| 3.0 * m as f64 + 5.0 * n as f64);
        let expected = 3.0 * 1.25 + 5.0 * 1.5;
        assert!((patch.evaluate(0.25, 0.5) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_known_coefficients() {
        let patch = patch_from(|m, n| if m == 1 && n == 1 { 1.0 } else { 0.0 });
        // a00 = p11, a11 = 0.25 * p11, a22 = 6.25 * p11
        assert!((patch.a[0][0] - 1.0).abs() < 1e-12);
        assert!((patch.a[1][1] - 0.0).abs() < 1e-12);
        assert!((patch.a[2][2] - 6.25).abs() < 1e-12);
    }
}
