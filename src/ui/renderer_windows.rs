use super::RenderError;
use std::sync::Arc;
use windows::Win32::Foundation::{HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    AC_SRC_ALPHA, AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS,
    HBITMAP, HDC,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW, SetWindowLongW, UpdateLayeredWindow, GWL_EXSTYLE, ULW_ALPHA, WS_EX_LAYERED,
};
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

/// Per-pixel alpha window: frames go through a DIB section into
/// UpdateLayeredWindow, so the transparent corners are really see-through.
pub struct Renderer {
    _window: Arc<Window>,
    hwnd: HWND,
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    hdc_mem: HDC,
    hbitmap: HBITMAP,
    bitmap_bits: *mut u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, RenderError> {
        let handle = window
            .window_handle()
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        let hwnd = match handle.as_raw() {
            RawWindowHandle::Win32(handle) => HWND(handle.hwnd.get() as *mut _),
            _ => return Err(RenderError::Surface("not a Win32 window".into())),
        };

        unsafe {
            // WS_EX_LAYERED is required for UpdateLayeredWindow
            let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE);
            SetWindowLongW(hwnd, GWL_EXSTYLE, ex_style | WS_EX_LAYERED.0 as i32);

            let hdc_screen = GetDC(hwnd);
            let hdc_mem = CreateCompatibleDC(hdc_screen);
            ReleaseDC(hwnd, hdc_screen);

            let mut renderer = Self {
                _window: window,
                hwnd,
                width: 0,
                height: 0,
                pixels: Vec::new(),
                hdc_mem,
                hbitmap: HBITMAP::default(),
                bitmap_bits: std::ptr::null_mut(),
            };
            renderer.resize(width, height)?;
            Ok(renderer)
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return Ok(());
        }

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width as i32,
                biHeight: -(height as i32), // Top-down DIB
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        unsafe {
            let mut bitmap_bits: *mut std::ffi::c_void = std::ptr::null_mut();
            let hbitmap = CreateDIBSection(self.hdc_mem, &bmi, DIB_RGB_COLORS, &mut bitmap_bits, None, 0)
                .map_err(|e| RenderError::Surface(e.to_string()))?;
            SelectObject(self.hdc_mem, hbitmap);
            if !self.hbitmap.is_invalid() {
                let _ = DeleteObject(self.hbitmap);
            }
            self.hbitmap = hbitmap;
            self.bitmap_bits = bitmap_bits as *mut u32;
        }

        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height) as usize];
        Ok(())
    }

    /// Lend the frame buffer to `draw` (premultiplied ARGB), then present it.
    /// Premultiplied 0xAARRGGBB is already the DIB's BGRA byte order.
    pub fn present_with(
        &mut self,
        draw: impl FnOnce(&mut [u32], usize, usize),
    ) -> Result<(), RenderError> {
        if self.bitmap_bits.is_null() {
            return Ok(());
        }
        draw(&mut self.pixels, self.width as usize, self.height as usize);

        unsafe {
            let bitmap =
                std::slice::from_raw_parts_mut(self.bitmap_bits, self.pixels.len());
            bitmap.copy_from_slice(&self.pixels);

            let size = SIZE {
                cx: self.width as i32,
                cy: self.height as i32,
            };
            let pt_src = POINT { x: 0, y: 0 };
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                BlendFlags: 0,
                SourceConstantAlpha: 255,
                AlphaFormat: AC_SRC_ALPHA as u8,
            };

            let hdc_desktop = GetDC(None);
            let result = UpdateLayeredWindow(
                self.hwnd,
                hdc_desktop,
                None, // Position is owned by winit
                Some(&size),
                self.hdc_mem,
                Some(&pt_src),
                None,
                Some(&blend),
                ULW_ALPHA,
            );
            ReleaseDC(None, hdc_desktop);
            result.map_err(|e| RenderError::Present(e.to_string()))
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            if !self.hbitmap.is_invalid() {
                let _ = DeleteObject(self.hbitmap);
            }
            let _ = DeleteDC(self.hdc_mem);
        }
    }
}
