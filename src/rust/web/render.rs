use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::pipeline::Analysis;

pub const PAGE_TITLE: &str = "AgriSense - Smart Crop Monitor";
pub const UPLOAD_PROMPT: &str =
    "Upload a clear, close-up photo of a single leaf against a plain background for best results.";

/// What the page shows for one render.
#[derive(Debug)]
pub enum PageView<'a> {
    /// No image yet, or the last upload failed. `notice` carries the error.
    AwaitingUpload { notice: Option<&'a str> },
    /// Full result for an uploaded image.
    ResultShown {
        analysis: &'a Analysis,
        image_bytes: &'a [u8],
    },
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inline `data:` URI for showing the upload back to the user.
pub fn image_data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn render_page(view: &PageView<'_>) -> String {
    let body = match view {
        PageView::AwaitingUpload { notice } => {
            let mut body = String::new();
            if let Some(notice) = notice {
                body.push_str(&format!(r#"<div class="error">{}</div>"#, escape_html(notice)));
            }
            body.push_str(&format!(r#"<div class="info">{}</div>"#, escape_html(UPLOAD_PROMPT)));
            body
        }
        PageView::ResultShown { analysis, image_bytes } => render_result(analysis, image_bytes),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AgriSense - Crop Monitor</title>
<style>
body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}
.info {{ background: #e8f0fe; padding: 0.75rem 1rem; border-radius: 0.4rem; }}
.success {{ background: #e6f4ea; padding: 0.75rem 1rem; border-radius: 0.4rem; }}
.error {{ background: #fce8e6; padding: 0.75rem 1rem; border-radius: 0.4rem; margin-bottom: 1rem; }}
figure img {{ max-width: 100%; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>Upload a leaf image to detect defects and get remedy suggestions.</p>
<form action="/analyze" method="post" enctype="multipart/form-data">
<label for="file">Upload a leaf image</label>
<input id="file" type="file" name="file" accept=".jpg,.jpeg,.png,image/jpeg,image/png">
<button type="submit">Analyze</button>
</form>
{body}
</body>
</html>
"#,
        title = escape_html(PAGE_TITLE),
        body = body,
    )
}

fn render_result(analysis: &Analysis, image_bytes: &[u8]) -> String {
    let prediction = &analysis.prediction;
    format!(
        r#"<figure><img src="{src}" alt="Uploaded Leaf"><figcaption>Uploaded Leaf</figcaption></figure>
<h2>Prediction</h2>
<ul><li><strong>{label}</strong> ({confidence:.2})</li></ul>
<h2>Detected Defect</h2>
<div class="info">{description}</div>
<h2>Suggested Remedy</h2>
<div class="success">{remedy}</div>
"#,
        src = image_data_uri(image_bytes),
        label = escape_html(&prediction.label),
        confidence = prediction.confidence,
        description = escape_html(analysis.defect.description),
        remedy = escape_html(analysis.defect.remedy),
    )
}
