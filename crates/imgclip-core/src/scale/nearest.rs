//! Nearest-neighbor sampling.

use super::SampleGrid;
use crate::raster::CHANNELS;

pub(super) fn scale(src: &[u8], dst: &mut [u8], grid: &SampleGrid) {
    for (dst_row, out_row) in dst.chunks_exact_mut(grid.dst_stride()).enumerate() {
        let (src_row, _) = grid.row(dst_row);
        let row_start = src_row * grid.src_width;

        for (dst_col, out) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
            let (src_col, _) = grid.column(dst_col);
            let idx = (row_start + src_col) * CHANNELS;
            out.copy_from_slice(&src[idx..idx + CHANNELS]);
        }
    }
}
