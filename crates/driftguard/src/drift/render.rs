//! HTML rendering of drift results.

use super::statistical::{DatasetDrift, FeatureDrift, FeatureKind};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:left}\
th{background:#f3f3f3}\
.drift{color:#b00020;font-weight:bold}\
.ok{color:#1b7f3b}";

/// Render a standalone HTML page for a drift run.
pub fn render_report(dataset: &DatasetDrift, features: &[FeatureDrift]) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Data Drift Report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Data Drift Report</h1>\n"
    ));

    let (class, verdict) = if dataset.dataset_drift {
        ("drift", "Dataset drift detected")
    } else {
        ("ok", "No dataset drift detected")
    };
    html.push_str(&format!(
        "<p class=\"{class}\">{verdict}</p>\n\
         <p>Drifted columns: {} of {} (share {:.3}, threshold {:.3})</p>\n\
         <p>Reference rows: {}, current rows: {}</p>\n",
        dataset.number_of_drifted_columns,
        dataset.number_of_columns,
        dataset.drift_share,
        dataset.drift_share_threshold,
        dataset.reference_rows,
        dataset.current_rows,
    ));

    html.push_str(
        "<table>\n<tr><th>Column</th><th>Type</th><th>Test</th>\
         <th>Score</th><th>Threshold</th><th>Drift</th></tr>\n",
    );
    for feature in features {
        let kind = match feature.column_type {
            FeatureKind::Numerical => "num",
            FeatureKind::Categorical => "cat",
        };
        let (class, label) = if feature.drift_detected {
            ("drift", "Detected")
        } else {
            ("ok", "Not detected")
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{kind}</td><td>{}</td><td>{:.6}</td><td>{}</td>\
             <td class=\"{class}\">{label}</td></tr>\n",
            escape_html(&feature.column),
            escape_html(&feature.stattest),
            feature.drift_score,
            feature.threshold,
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");

    html
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
