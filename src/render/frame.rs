//! Frame buffers, the [`FrameRenderer`] seam, and a deterministic demo
//! producer.

use rayon::prelude::*;

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::RenderctlResult;

/// A produced frame as tightly packed RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

/// Frame producer driven by a [`RenderJob`](crate::RenderJob).
///
/// The driver calls [`FrameRenderer::render_frame`] once per frame in range
/// order, and [`FrameRenderer::reinitialize`] before restarting when the
/// controller returned [`Status::ReinitializeRendering`].
///
/// [`Status::ReinitializeRendering`]: crate::Status::ReinitializeRendering
pub trait FrameRenderer: Send {
    /// Produce one frame.
    fn render_frame(&mut self, frame: FrameIndex) -> RenderctlResult<FrameRGBA>;

    /// Rebuild renderer state before the job restarts.
    fn reinitialize(&mut self) -> RenderctlResult<()> {
        Ok(())
    }
}

/// Deterministic gradient frame producer for demos and tests.
///
/// Pixel values depend only on position, frame index, and the current
/// generation, so output is reproducible across runs and thread counts. Rows
/// are filled in parallel.
#[derive(Clone, Debug)]
pub struct PatternRenderer {
    canvas: Canvas,
    generation: u64,
}

impl PatternRenderer {
    /// Create a producer for the given canvas size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            generation: 0,
        }
    }

    /// Number of reinitializations performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl FrameRenderer for PatternRenderer {
    fn render_frame(&mut self, frame: FrameIndex) -> RenderctlResult<FrameRGBA> {
        let width = self.canvas.width as usize;
        let height = self.canvas.height as usize;
        let mut data = vec![0u8; width * height * 4];
        let f = frame.0;
        let generation = self.generation;

        data.par_chunks_mut(width.max(1) * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    px[0] = ((x as u64) ^ f) as u8;
                    px[1] = ((y as u64) ^ f) as u8;
                    px[2] = (x as u64).wrapping_add(y as u64).wrapping_add(generation) as u8;
                    px[3] = 255;
                }
            });

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        })
    }

    fn reinitialize(&mut self) -> RenderctlResult<()> {
        self.generation += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
