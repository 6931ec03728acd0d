use placement_core::{Position, Stage};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::constants::STAGE_MARGIN_PX;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

/// Ensure the canvas backing store matches the CSS size and device pixel ratio
/// to prevent non-uniform stretching.
pub fn sync_canvas_size(window: &Window, canvas: &HtmlCanvasElement) {
    let dpr = window.device_pixel_ratio();
    let (css_w, css_h) = if let Some(el) = canvas.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        (rect.width().max(1.0), rect.height().max(1.0))
    } else {
        (canvas.client_width() as f64, canvas.client_height() as f64)
    };
    let target_w = (css_w * dpr).round().clamp(1.0, 10000.0) as u32;
    let target_h = (css_h * dpr).round().clamp(1.0, 10000.0) as u32;
    if canvas.width() != target_w {
        canvas.set_width(target_w);
    }
    if canvas.height() != target_h {
        canvas.set_height(target_h);
    }
}

/// Scale and offset that fit the whole stage into the canvas, centered,
/// keeping its aspect ratio.
pub fn fit_stage(canvas_w: f64, canvas_h: f64, stage: Stage) -> (f64, (f64, f64)) {
    let scale_x = (canvas_w - 2.0 * STAGE_MARGIN_PX) / stage.width;
    let scale_y = (canvas_h - 2.0 * STAGE_MARGIN_PX) / stage.height;
    let scale = scale_x.min(scale_y).max(0.1);
    let ox = (canvas_w - stage.width * scale) / 2.0;
    let oy = (canvas_h - stage.height * scale) / 2.0;
    (scale, (ox, oy))
}

/// Convert a stage-space point to canvas pixels.
pub fn to_screen(p: Position, scale: f64, offset: (f64, f64)) -> (f64, f64) {
    let (ox, oy) = offset;
    (p.x * scale + ox, p.y * scale + oy)
}

/// Convert canvas pixels back into stage space.
pub fn from_screen(x: f64, y: f64, scale: f64, offset: (f64, f64)) -> Position {
    let (ox, oy) = offset;
    Position {
        x: (x - ox) / scale,
        y: (y - oy) / scale,
    }
}

/// Client coordinates of a mouse event in canvas backing-store pixels, so
/// hit testing works even if CSS scales the canvas element.
pub fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> (f64, f64) {
    if let Some(el) = cv.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        let x = (e.client_x() as f64 - rect.left()) * (cv.width() as f64) / rect.width().max(1.0);
        let y = (e.client_y() as f64 - rect.top()) * (cv.height() as f64) / rect.height().max(1.0);
        (x, y)
    } else {
        (e.offset_x() as f64, e.offset_y() as f64)
    }
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    join_url(&base, p)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Fetch a text resource trying a list of fallback URLs in order.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(_) => continue,
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(_) => continue,
        };
        if !resp.ok() {
            continue;
        }
        if let Ok(text_promise) = resp.text()
            && let Ok(text_js) = wasm_bindgen_futures::JsFuture::from(text_promise).await
            && let Some(s) = text_js.as_string()
        {
            return Some(s);
        }
    }
    None
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}

/// Layout names end up in URLs; keep them to a safe alphabet.
pub fn is_layout_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_round_trip() {
        let (scale, offset) = (2.5, (40.0, 12.0));
        let p = Position::new(384.0, 216.0);
        let (sx, sy) = to_screen(p, scale, offset);
        assert_eq!((sx, sy), (1000.0, 552.0));
        assert_eq!(from_screen(sx, sy, scale, offset), p);
    }

    #[test]
    fn stage_fit_is_centered() {
        let stage = Stage {
            width: 800.0,
            height: 600.0,
        };
        let (scale, (ox, oy)) = fit_stage(1640.0, 640.0, stage);
        assert_eq!(scale, 1.0);
        assert_eq!(oy, 20.0);
        assert_eq!(ox, 420.0);
    }

    #[test]
    fn query_params_are_decoded() {
        assert_eq!(
            get_query_param("?lang=en&layout=clothes%2Dkids", "layout").as_deref(),
            Some("clothes-kids")
        );
        assert_eq!(get_query_param("?lang=en", "layout"), None);
        assert_eq!(get_query_param("?layout", "layout").as_deref(), Some(""));
    }

    #[test]
    fn layout_names_are_restricted() {
        assert!(is_layout_name("clothes_2"));
        assert!(!is_layout_name("../secret"));
        assert!(!is_layout_name(""));
    }

    #[test]
    fn urls_join_with_single_slash() {
        assert_eq!(join_url("/app/", "/layouts/a.json"), "/app/layouts/a.json");
        assert_eq!(join_url("/", "layouts/a.json"), "/layouts/a.json");
    }
}
