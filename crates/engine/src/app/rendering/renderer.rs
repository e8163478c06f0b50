use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use winit::window::Window;

use super::surface::RenderSurface;
use super::{LOGICAL_FRAME_HEIGHT_PX, LOGICAL_FRAME_WIDTH_PX};

/// Presents the logical output frame to the window, letting `pixels` handle
/// the scaling from the fixed logical resolution to the surface size.
pub struct Renderer {
    pixels: Pixels<'static>,
}

impl Renderer {
    pub fn new(window: &'static Window) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(LOGICAL_FRAME_WIDTH_PX, LOGICAL_FRAME_HEIGHT_PX, surface)?;
        Ok(Self { pixels })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    /// Copies the frame into the presenter buffer, scaled by `brightness`
    /// (screen fades), and renders it.
    pub fn present(&mut self, frame: &RenderSurface, brightness: f32) -> Result<(), Error> {
        debug_assert_eq!(frame.width(), LOGICAL_FRAME_WIDTH_PX);
        debug_assert_eq!(frame.height(), LOGICAL_FRAME_HEIGHT_PX);

        let factor = brightness.clamp(0.0, 1.0);
        let target = self.pixels.frame_mut();
        for (target_px, source_px) in target
            .chunks_exact_mut(4)
            .zip(frame.pixels().chunks_exact(4))
        {
            target_px[0] = (source_px[0] as f32 * factor) as u8;
            target_px[1] = (source_px[1] as f32 * factor) as u8;
            target_px[2] = (source_px[2] as f32 * factor) as u8;
            target_px[3] = 255;
        }
        self.pixels.render()
    }
}
