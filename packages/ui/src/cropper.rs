//! Square crop of a profile photo before upload.
//!
//! The geometry is plain arithmetic over the image's natural size. Rendering
//! the chosen square to a JPEG goes through a canvas and only exists in the
//! browser.

use dioxus::prelude::*;

pub const IMAGE_ID: &str = "cropper-image";
const PREVIEW_PX: f64 = 240.0;

/// Source rectangle, in image pixels, of a square crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

/// Zoom 1.0 selects the largest square that fits; higher zoom shrinks it.
/// `pan_x`/`pan_y` place the square within the leftover space, 0.5 centered.
pub fn square_crop(width: f64, height: f64, zoom: f64, pan_x: f64, pan_y: f64) -> CropRegion {
    let zoom = if zoom.is_finite() { zoom.max(1.0) } else { 1.0 };
    let side = width.min(height).max(0.0) / zoom;
    CropRegion {
        x: (width - side).max(0.0) * pan_x.clamp(0.0, 1.0),
        y: (height - side).max(0.0) * pan_y.clamp(0.0, 1.0),
        side,
    }
}

impl CropRegion {
    /// CSS that shows this region of `src` scaled into a `px`-wide square.
    pub fn preview_style(&self, src: &str, width: f64, height: f64, px: f64) -> String {
        if self.side <= 0.0 {
            return String::new();
        }
        let scale = px / self.side;
        format!(
            "width: {px}px; height: {px}px; background-image: url('{src}'); \
             background-size: {:.1}px {:.1}px; background-position: -{:.1}px -{:.1}px;",
            width * scale,
            height * scale,
            self.x * scale,
            self.y * scale,
        )
    }
}

#[cfg(target_arch = "wasm32")]
fn natural_size() -> Option<(f64, f64)> {
    use wasm_bindgen::JsCast;

    let image: web_sys::HtmlImageElement = web_sys::window()?
        .document()?
        .get_element_by_id(IMAGE_ID)?
        .dyn_into()
        .ok()?;
    Some((f64::from(image.natural_width()), f64::from(image.natural_height())))
}

#[cfg(not(target_arch = "wasm32"))]
fn natural_size() -> Option<(f64, f64)> {
    None
}

/// Draw `region` of the loaded image onto a `size`×`size` canvas and encode it
/// as JPEG.
#[cfg(target_arch = "wasm32")]
pub fn render_jpeg(region: CropRegion, size: u32) -> Result<Vec<u8>, String> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let image: web_sys::HtmlImageElement = document
        .get_element_by_id(IMAGE_ID)
        .ok_or("Image not loaded")?
        .dyn_into()
        .map_err(|_| "Not an image element".to_string())?;
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into()
        .map_err(|_| "Not a canvas element".to_string())?;
    canvas.set_width(size);
    canvas.set_height(size);
    let context: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| format!("{e:?}"))?
        .ok_or("Canvas has no 2d context")?
        .dyn_into()
        .map_err(|_| "Unexpected canvas context".to_string())?;
    context
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            &image,
            region.x,
            region.y,
            region.side,
            region.side,
            0.0,
            0.0,
            f64::from(size),
            f64::from(size),
        )
        .map_err(|e| format!("{e:?}"))?;

    let data_url = canvas
        .to_data_url_with_type("image/jpeg")
        .map_err(|e| format!("{e:?}"))?;
    let encoded = data_url
        .split_once(",")
        .map(|(_, b64)| b64)
        .ok_or("Malformed data URL")?;
    let binary = window.atob(encoded).map_err(|e| format!("{e:?}"))?;
    Ok(binary.chars().map(|c| c as u8).collect())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn render_jpeg(_region: CropRegion, _size: u32) -> Result<Vec<u8>, String> {
    Err("Cropping needs a browser".to_string())
}

/// Modal that lets the user frame a square and emits the cropped JPEG.
#[component]
pub fn PhotoCropper(
    source: String,
    output_size: u32,
    #[props(default)] uploading: bool,
    on_crop: EventHandler<Vec<u8>>,
    on_cancel: EventHandler<()>,
    on_error: EventHandler<String>,
) -> Element {
    let mut size = use_signal(|| None::<(f64, f64)>);
    let mut zoom = use_signal(|| 1.0_f64);
    let mut pan_x = use_signal(|| 0.5_f64);
    let mut pan_y = use_signal(|| 0.5_f64);

    let region = size().map(|(w, h)| (w, h, square_crop(w, h, zoom(), pan_x(), pan_y())));
    let preview = region
        .map(|(w, h, r)| r.preview_style(&source, w, h, PREVIEW_PX))
        .unwrap_or_default();

    let crop = move |_| match region {
        Some((_, _, r)) => match render_jpeg(r, output_size) {
            Ok(bytes) => on_crop.call(bytes),
            Err(e) => on_error.call(e),
        },
        None => on_error.call("Image is still loading".to_string()),
    };

    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal cropper",
                h3 { "Crop your photo" }
                img {
                    id: IMAGE_ID,
                    class: "cropper-source",
                    src: "{source}",
                    onload: move |_| size.set(natural_size()),
                }
                div { class: "cropper-preview", style: "{preview}" }
                label {
                    "Zoom"
                    input {
                        r#type: "range", min: "1", max: "3", step: "0.05",
                        value: "{zoom}",
                        oninput: move |e| zoom.set(e.value().parse().unwrap_or(1.0)),
                    }
                }
                label {
                    "Horizontal"
                    input {
                        r#type: "range", min: "0", max: "1", step: "0.01",
                        value: "{pan_x}",
                        oninput: move |e| pan_x.set(e.value().parse().unwrap_or(0.5)),
                    }
                }
                label {
                    "Vertical"
                    input {
                        r#type: "range", min: "0", max: "1", step: "0.01",
                        value: "{pan_y}",
                        oninput: move |e| pan_y.set(e.value().parse().unwrap_or(0.5)),
                    }
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        disabled: uploading,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: uploading || region.is_none(),
                        onclick: crop,
                        if uploading { "Uploading..." } else { "Crop & Upload" }
                    }
                }
            }
        }
    }
}
