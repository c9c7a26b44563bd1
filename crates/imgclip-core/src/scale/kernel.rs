//! Bicubic interpolation by separable cubic convolution.

use super::{to_channel, SampleGrid};
use crate::raster::CHANNELS;

/// Kernel sharpness parameter.
const A: f64 = -1.0;

/// Cubic convolution weight for a sample at distance `t`.
///
/// ```text
/// S(t) = 1 - (A+3)t² + (A+2)|t|³          |t| <= 1
///      = -4A + 8A|t| - 5At² + A|t|³       1 < |t| <= 2
///      = 0                                otherwise
/// ```
pub fn cubic_weight(t: f64) -> f64 {
    let abs = t.abs();
    let sq = abs * abs;
    let cube = sq * abs;
    if abs <= 1.0 {
        1.0 - (A + 3.0) * sq + (A + 2.0) * cube
    } else if abs <= 2.0 {
        -4.0 * A + 8.0 * A * abs - 5.0 * A * sq + A * cube
    } else {
        0.0
    }
}

pub(super) fn scale(src: &[u8], dst: &mut [u8], grid: &SampleGrid) {
    for (dst_row, out_row) in dst.chunks_exact_mut(grid.dst_stride()).enumerate() {
        let (src_row, v) = grid.row(dst_row);
        let row_weights = weights(v);

        for (dst_col, out) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
            let (src_col, u) = grid.column(dst_col);
            let col_weights = weights(u);

            let mut acc = [0.0f64; CHANNELS];
            for (m, wm) in row_weights.iter().enumerate() {
                let row = src_row as isize + m as isize - 1;
                for (n, wn) in col_weights.iter().enumerate() {
                    let col = src_col as isize + n as isize - 1;
                    let idx = grid.clamped_offset(row, col);
                    let weight = wm * wn;
                    for (c, sum) in acc.iter_mut().enumerate() {
                        *sum += src[idx + c] as f64 * weight;
                    }
                }
            }

            for (o, sum) in out.iter_mut().zip(acc) {
                *o = to_channel(sum);
            }
        }
    }
}

/// Weights for the taps at offsets -1, 0, 1, 2 from the integer position.
#[inline]
fn weights(frac: f64) -> [f64; 4] {
    [
        cubic_weight(-1.0 - frac),
        cubic_weight(-frac),
        cubic_weight(1.0 - frac),
        cubic_weight(2.0 - frac),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_at_integer_offsets() {
        assert_eq!(cubic_weight(0.0), 1.0);
        assert_eq!(cubic_weight(1.0), 0.0);
        assert_eq!(cubic_weight(-1.0), 0.0);
        assert_eq!(cubic_weight(2.0), 0.0);
        assert_eq!(cubic_weight(-2.0), 0.0);
        assert_eq!(cubic_weight(2.5), 0.0);
    }

    #[test]
    fn test_kernel_symmetric() {
        for t in [0.1, 0.5, 0.9, 1.3, 1.75] {
            assert_eq!(cubic_weight(t), cubic_weight(-t));
        }
    }

    #[test]
    fn test_weights_at_zero_fraction_select_centre() {
        assert_eq!(weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weights_half() {
        // S(0.5) = 1 - 2*0.25 + 0.125 = 0.625, S(1.5) = 4 - 12 + 11.25 - 3.375 = -0.125
        let w = weights(0.5);
        assert!((w[0] + 0.125).abs() < 1e-12);
        assert!((w[1] - 0.625).abs() < 1e-12);
        assert!((w[2] - 0.625).abs() < 1e-12);
        assert!((w[3] + 0.125).abs() < 1e-12);
    }
}
