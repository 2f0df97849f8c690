use api::DailyRecord;
use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::aggregate::DailySeries;
use crate::core::chart::{layout, ChartConfig, ChartLayout};
use crate::core::platform;
use crate::history::{build_csv, palette, timestamp_slug};
use crate::t;

const PNG_WIDTH: u32 = 1200;
const PNG_HEIGHT: u32 = 720;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportKind {
    Json,
    Csv,
    Png,
}

impl ExportKind {
    fn name(self) -> &'static str {
        match self {
            ExportKind::Json => "json",
            ExportKind::Csv => "csv",
            ExportKind::Png => "png",
        }
    }
}

#[component]
pub fn HistoryExportPanel(records: Vec<DailyRecord>) -> Element {
    let mut status = use_signal(|| ExportStatus::Idle);
    let mut busy = use_signal(|| false);

    let mut start = move |kind: ExportKind, records: Vec<DailyRecord>| {
        if busy() {
            return;
        }
        busy.set(true);
        status.set(ExportStatus::Working);
        platform::spawn_future(async move {
            let outcome = match kind {
                ExportKind::Json => export_json(records).await,
                ExportKind::Csv => export_csv(records).await,
                ExportKind::Png => export_png(records).await,
            };
            match outcome {
                Ok(message) => {
                    info!(kind = kind.name(), "export finished");
                    status.set(ExportStatus::Done(message));
                }
                Err(err) => {
                    warn!(kind = kind.name(), error = %err, "export failed");
                    status.set(ExportStatus::Error(err));
                }
            }
            busy.set(false);
        });
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("card__meta", t!("export-working"))),
        ExportStatus::Done(message) => Some(("card__meta card__meta--success", format!("✅ {message}"))),
        ExportStatus::Error(err) => Some(("card__meta card__meta--error", format!("⚠️ {err}"))),
    };

    let json_records = records.clone();
    let csv_records = records.clone();
    let png_records = records.clone();

    rsx! {
        section { class: "card history-export",
            div { class: "card__header",
                h2 { class: "section-title", {t!("export-title")} }
            }

            if records.is_empty() {
                p { class: "card__placeholder", {t!("export-empty")} }
            } else {
                p { {t!("export-intro")} }
                div { class: "history-export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: move |_| start(ExportKind::Json, json_records.clone()),
                        {t!("export-json")}
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: move |_| start(ExportKind::Csv, csv_records.clone()),
                        {t!("export-csv")}
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy(),
                        onclick: move |_| start(ExportKind::Png, png_records.clone()),
                        {t!("export-png")}
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}

async fn export_json(records: Vec<DailyRecord>) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&records).map_err(|err| err.to_string())?;
    copy_to_clipboard(json.clone()).await?;
    let filename = format!("mood-entries-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("JSON copied and saved to {path}"),
        None => "JSON copied to clipboard and download started".to_string(),
    })
}

async fn export_csv(records: Vec<DailyRecord>) -> Result<String, String> {
    let csv = build_csv(&records);
    let filename = format!("mood-entries-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

async fn export_png(records: Vec<DailyRecord>) -> Result<String, String> {
    let svg = chart_svg(&records)?;
    let png = rasterize(&svg).await?;
    let filename = format!("mood-trend-{}.png", timestamp_slug());
    let delivery = download_bytes(&filename, "image/png", png).await?;
    Ok(match delivery {
        Some(path) => format!("Chart saved to {path}"),
        None => "Chart download started".to_string(),
    })
}

/// The trend chart as a standalone SVG at export resolution.
fn chart_svg(records: &[DailyRecord]) -> Result<String, String> {
    let entries = DailySeries::from_records(records).entries();
    let config = ChartConfig {
        max_x_labels: 10,
        ..ChartConfig::default()
    };
    match layout(
        &entries,
        f64::from(PNG_WIDTH),
        f64::from(PNG_HEIGHT),
        &config,
    ) {
        ChartLayout::Plot(plot) => Ok(plot.to_svg(&palette())),
        ChartLayout::Placeholder => Err("At least two days with ratings are needed for a chart".into()),
    }
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document.exec_command("copy").unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err("Clipboard copy blocked".into())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

/// Web: trigger a browser download and return `None`.
/// Native: write into the app's data directory and return the path.
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let _ = mime;
        let dir = export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        fs::write(&path, bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("org", "MoodTracker", "MoodTracker")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn rasterize(svg: &str) -> Result<Vec<u8>, String> {
    use std::sync::Arc;

    let mut fonts = usvg::fontdb::Database::new();
    fonts.load_system_fonts();
    let options = usvg::Options {
        fontdb: Arc::new(fonts),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| err.to_string())?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or("Unable to allocate image buffer")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|err| err.to_string())
}

/// Draw the SVG onto a canvas and read it back as PNG.
#[cfg(target_arch = "wasm32")]
async fn rasterize(svg: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(PNG_WIDTH);
    canvas.set_height(PNG_HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url.split(',').nth(1).ok_or("Malformed data URL")?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| "PNG decode failed".to_string())
}
