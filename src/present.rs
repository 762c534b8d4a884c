//! Host-side presentation helpers for engine framebuffers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::Framebuffer;

/// Nearest-neighbour scale of `src` into `dst`, preserving aspect ratio.
///
/// `dst` is a row-major `dw` x `dh` buffer of `0x00RRGGBB` pixels. It is
/// cleared to black first; the scaled image is centred, leaving letterbox or
/// pillarbox bars. Empty dimensions and undersized buffers leave `dst`
/// untouched.
pub fn blit_nn_fit(dst: &mut [u32], dw: usize, dh: usize, src: &Framebuffer<'_>) {
    let (sw, sh) = (src.width, src.height);
    if dw == 0 || dh == 0 || sw == 0 || sh == 0 {
        return;
    }
    if dst.len() < dw * dh || src.pixels.len() < sw * sh {
        return;
    }

    // Compare dw/sw against dh/sh without floats.
    let (tw, th) = if dw * sh <= dh * sw {
        (dw, ((dw * sh) / sw).max(1))
    } else {
        (((dh * sw) / sh).max(1), dh)
    };
    let x0 = (dw - tw) / 2;
    let y0 = (dh - th) / 2;

    dst[..dw * dh].fill(0);

    // 16.16 fixed-point stepping
    let x_step = ((sw as u64) << 16) / tw as u64;
    let y_step = ((sh as u64) << 16) / th as u64;

    for y in 0..th {
        let sy = (((y as u64) * y_step) >> 16) as usize;
        let src_row = &src.pixels[sy * sw..(sy + 1) * sw];
        let start = (y0 + y) * dw + x0;
        let dst_row = &mut dst[start..start + tw];

        let mut sx_fp: u64 = 0;
        for px in dst_row.iter_mut() {
            *px = src_row[(sx_fp >> 16) as usize];
            sx_fp += x_step;
        }
    }
}

/// Writes a `width` x `height` pixel buffer as a binary PPM (P6) image.
pub fn write_ppm(path: &Path, pixels: &[u32], width: usize, height: usize) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write!(out, "P6\n{} {}\n255\n", width, height)?;
    for px in pixels.iter().take(width * height) {
        out.write_all(&[(px >> 16) as u8, (px >> 8) as u8, *px as u8])?;
    }
    out.flush()
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;

    log::info!("Saved {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}
