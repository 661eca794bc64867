//! Scale-to-fit placement of the input image on the canvas.

/// Free margin kept around the image, in pixels.
pub const BORDER: f64 = 16.0;

/// Where the image lands on screen: a `w × h` box at `(tx, ty)`, drawn at
/// `zoom` screen pixels per image pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Display {
    pub w:    f64,
    pub h:    f64,
    pub tx:   f64,
    pub ty:   f64,
    pub zoom: f64,
}

impl Display {
    /// Largest box with the image's aspect ratio that fits inside the canvas
    /// minus the border, centred.
    pub fn fit(width: f64, height: f64, img_w: f64, img_h: f64) -> Display {
        if img_w <= 0.0 || img_h <= 0.0 {
            return Display { w: 0.0, h: 0.0, tx: width / 2.0, ty: height / 2.0, zoom: 0.0 };
        }
        let aspect = img_w / img_h;
        let wmax = (width - 2.0 * BORDER).max(0.0);
        let hmax = (height - 2.0 * BORDER).max(0.0);

        let w = wmax.min(hmax * aspect);
        let h = (wmax / aspect).min(hmax);

        Display {
            w,
            h,
            tx:   (width - w) / 2.0,
            ty:   (height - h) / 2.0,
            zoom: (w / img_w).min(h / img_h),
        }
    }
}
