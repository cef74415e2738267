//! Thin wrappers over browser APIs, with native fallbacks so the crate builds
//! and tests off-wasm.

use std::time::Duration;

use dioxus::html::FileData;

use crate::actions::PickedFile;

pub async fn sleep_ms(ms: u32) {
    let duration = Duration::from_millis(u64::from(ms));
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Full-page navigation, leaving the router.
pub fn navigate_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {path}: {e:?}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("navigate to {path}");
}

/// Native confirm dialog. Off-wasm everything is confirmed.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        true
    }
}

/// Origin of the page serving the app, e.g. `https://jobs.example.com`.
pub fn page_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    None
}

/// Server address to use. An empty configured value means the page origin.
pub fn resolve_base_url(configured: &str) -> String {
    if !configured.trim().is_empty() {
        return configured.trim().to_string();
    }
    page_origin().unwrap_or_else(|| "http://localhost:5000".to_string())
}

/// Today's date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let iso: String = js_sys::Date::new_0().to_iso_string().into();
        iso.chars().take(10).collect()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let days = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() / 86_400)
            .unwrap_or(0);
        chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_days(chrono::Days::new(days)))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Blob URL for in-memory bytes, used to preview a picked image.
#[cfg(target_arch = "wasm32")]
pub fn object_url(bytes: &[u8], mime: &str) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn object_url(_bytes: &[u8], _mime: &str) -> Option<String> {
    None
}

pub fn revoke_object_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = url;
}

/// Hand bytes to the browser as a file download.
pub fn download(bytes: &[u8], mime: &str, file_name: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let url = object_url(bytes, mime).ok_or("Could not create download")?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| format!("{e:?}"))?
            .dyn_into()
            .map_err(|_| "Not an anchor element".to_string())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (bytes, mime);
        Err(format!("Downloads need a browser ({file_name})"))
    }
}

/// Read a file chosen in a file input or dropped on the page.
pub async fn read_file(file: FileData) -> Result<PickedFile, String> {
    let name = file.name();
    let mime = file.content_type().unwrap_or_default();
    let bytes = file.read_bytes().await.map_err(|e| e.to_string())?;
    Ok(PickedFile {
        name,
        mime,
        bytes: bytes.to_vec(),
    })
}
