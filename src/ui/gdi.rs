// GDI canvas for the eye window

use crate::eye::theme::CLR_TRANSPARENT_KEY;
use crate::geometry::Point;
use crate::surface::{Canvas, Outline, Rgb};
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::*;

pub fn colorref(c: Rgb) -> COLORREF {
    COLORREF(c.r as u32 | (c.g as u32) << 8 | (c.b as u32) << 16)
}

pub fn rgb_from(c: COLORREF) -> Rgb {
    Rgb::new(
        (c.0 & 0xFF) as u8,
        ((c.0 >> 8) & 0xFF) as u8,
        ((c.0 >> 16) & 0xFF) as u8,
    )
}

fn fill_rect_color(hdc: HDC, r: &RECT, color: COLORREF) {
    unsafe {
        let brush = CreateSolidBrush(color);
        FillRect(hdc, r, brush);
        let _ = DeleteObject(HGDIOBJ::from(brush));
    }
}

/// Draws into a (memory) DC covering the client rect
pub struct GdiCanvas {
    hdc: HDC,
    client: RECT,
}

impl GdiCanvas {
    pub fn new(hdc: HDC, client: RECT) -> Self {
        Self { hdc, client }
    }
}

impl Canvas for GdiCanvas {
    fn clear(&mut self) {
        fill_rect_color(self.hdc, &self.client, colorref(CLR_TRANSPARENT_KEY));
    }

    fn circle(&mut self, center: Point, radius: i32, fill: Rgb, outline: Option<Outline>) {
        unsafe {
            let brush = CreateSolidBrush(colorref(fill));
            let pen = outline.map(|o| CreatePen(PS_SOLID, o.width, colorref(o.color)));
            let pen_obj = match pen {
                Some(p) => HGDIOBJ::from(p),
                None => GetStockObject(NULL_PEN),
            };

            let old_brush = SelectObject(self.hdc, HGDIOBJ::from(brush));
            let old_pen = SelectObject(self.hdc, pen_obj);
            let _ = Ellipse(
                self.hdc,
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            );
            SelectObject(self.hdc, old_pen);
            SelectObject(self.hdc, old_brush);

            let _ = DeleteObject(HGDIOBJ::from(brush));
            if let Some(p) = pen {
                let _ = DeleteObject(HGDIOBJ::from(p));
            }
        }
    }
}
