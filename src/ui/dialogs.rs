// Native color chooser

use super::gdi::{colorref, rgb_from};
use crate::surface::{ColorPicker, Rgb};
use windows::Win32::Foundation::{COLORREF, HWND};
use windows::Win32::UI::Controls::Dialogs::{ChooseColorW, CC_FULLOPEN, CC_RGBINIT, CHOOSECOLORW};

/// `ChooseColorW` wrapper. Custom swatches survive between openings.
pub struct ColorDialog {
    owner: HWND,
    custom: [COLORREF; 16],
}

impl ColorDialog {
    pub fn new(owner: HWND) -> Self {
        Self {
            owner,
            custom: [COLORREF(0x00FF_FFFF); 16],
        }
    }
}

impl ColorPicker for ColorDialog {
    fn pick(&mut self, initial: Rgb) -> Option<Rgb> {
        let mut cc = CHOOSECOLORW {
            lStructSize: std::mem::size_of::<CHOOSECOLORW>() as u32,
            hwndOwner: self.owner,
            rgbResult: colorref(initial),
            lpCustColors: self.custom.as_mut_ptr(),
            Flags: CC_RGBINIT | CC_FULLOPEN,
            ..Default::default()
        };

        // Modal: pumps messages until the user confirms or cancels
        let confirmed = unsafe { ChooseColorW(&mut cc) }.as_bool();
        confirmed.then(|| rgb_from(cc.rgbResult))
    }
}
