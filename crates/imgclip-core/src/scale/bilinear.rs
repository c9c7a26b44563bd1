//! Bilinear interpolation over the 2x2 neighbourhood.

use super::{to_channel, SampleGrid};
use crate::raster::CHANNELS;

pub(super) fn scale(src: &[u8], dst: &mut [u8], grid: &SampleGrid) {
    for (dst_row, out_row) in dst.chunks_exact_mut(grid.dst_stride()).enumerate() {
        let (src_row, v) = grid.row(dst_row);
        let v1 = 1.0 - v;
        let row = src_row as isize;

        for (dst_col, out) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
            let (src_col, u) = grid.column(dst_col);
            let u1 = 1.0 - u;
            let col = src_col as isize;

            let i00 = grid.clamped_offset(row, col);
            let i10 = grid.clamped_offset(row, col + 1);
            let i01 = grid.clamped_offset(row + 1, col);
            let i11 = grid.clamped_offset(row + 1, col + 1);

            for c in 0..CHANNELS {
                let p00 = src[i00 + c] as f64;
                let p10 = src[i10 + c] as f64;
                let p01 = src[i01 + c] as f64;
                let p11 = src[i11 + c] as f64;

                out[c] = to_channel(v * (u1 * p01 + u * p11) + v1 * (u1 * p00 + u * p10));
            }
        }
    }
}
