use super::RenderError;
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::window::Window;

pub struct Renderer {
    // Surface must drop before the context
    surface: Surface<Arc<Window>, Arc<Window>>,
    _context: Context<Arc<Window>>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, RenderError> {
        let context = Context::new(window.clone()).map_err(|e| RenderError::Surface(e.to_string()))?;
        let surface = Surface::new(&context, window).map_err(|e| RenderError::Surface(e.to_string()))?;

        let mut renderer = Self {
            surface,
            _context: context,
            width: 0,
            height: 0,
        };
        renderer.resize(width, height)?;
        Ok(renderer)
    }

    /// Zero sizes are ignored; the surface keeps its previous size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.surface
            .resize(w, h)
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Lend the frame buffer to `draw` (premultiplied ARGB), then present it
    pub fn present_with(
        &mut self,
        draw: impl FnOnce(&mut [u32], usize, usize),
    ) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| RenderError::Present(e.to_string()))?;
        draw(&mut buffer, self.width as usize, self.height as usize);
        buffer
            .present()
            .map_err(|e| RenderError::Present(e.to_string()))
    }
}
