//! HTML rendering for the upload form and result blocks.
//!
//! Plain `format!` templates; the pages are two forms and a summary card,
//! not worth a template engine. Every user-derived value goes through
//! [`escape`] before insertion.

use crate::report::model::{InsightRecord, InsightStatus, ReportRecord};

/// Escape a string for HTML text and attribute contexts.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: header, submission forms, optional result block, footer.
pub fn upload_page(result_block: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>SkyVitals Clinic</title>
  <link href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css" rel="stylesheet">
</head>
<body class="bg-gray-100 text-gray-800 font-sans">
  <header class="bg-blue-700 text-white p-6 shadow-md">
    <div class="container mx-auto flex flex-col items-center">
      <h1 class="text-4xl font-extrabold mb-1">SkyVitals Clinic</h1>
      <p class="text-lg font-light text-center">Submit a health report to receive a fast assessment and recommendations.</p>
    </div>
  </header>

  <main class="container mx-auto mt-16 px-4">
    <div class="bg-white rounded-xl shadow-lg p-8 max-w-lg mx-auto">
      <div class="mb-4 text-center">
        <h2 class="text-2xl font-semibold mb-2">Analyze a Medical Report</h2>
        <p class="text-sm text-gray-600">Reports stay confidential. Critical results alert a clinician automatically.</p>
      </div>

      <form action="/analyze" method="post" enctype="multipart/form-data" class="space-y-6">
        <div>
          <label class="block text-sm font-medium text-gray-700 mb-2">Upload a report file</label>
          <input type="file" name="document"
            class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg cursor-pointer bg-gray-50 focus:outline-none" />
        </div>
        <div class="text-center">
          <input type="submit" value="Upload &amp; Analyze"
            class="bg-blue-600 hover:bg-blue-700 text-white font-medium py-2 px-4 rounded-lg shadow-md transition duration-150" />
        </div>
      </form>

      <form action="/analyze/stored" method="post" class="mt-6 space-y-4 border-t border-gray-200 pt-6">
        <div>
          <label class="block text-sm font-medium text-gray-700 mb-2">Or analyze a stored report by name</label>
          <input type="text" name="key" placeholder="reports/2025/p100.txt"
            class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg bg-gray-50 px-3 py-2 focus:outline-none" />
        </div>
        <div class="text-center">
          <input type="submit" value="Fetch &amp; Analyze"
            class="bg-blue-600 hover:bg-blue-700 text-white font-medium py-2 px-4 rounded-lg shadow-md transition duration-150" />
        </div>
      </form>
    </div>

    {result_block}
  </main>

  <footer class="mt-12 text-center text-sm text-gray-500">
    &copy; 2025 SkyVitals Clinic. All rights reserved.
  </footer>
</body>
</html>"#
    )
}

/// Summary card for a processed report.
pub fn summary_block(report: &ReportRecord, insight: &InsightRecord) -> String {
    let patient_id = escape(report.patient_id.as_deref().unwrap_or("-"));
    let test_type = escape(report.test_type.as_deref().unwrap_or("-"));
    let value = report
        .value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".into());
    let unit = escape(report.unit.as_deref().unwrap_or(""));
    let timestamp = escape(&report.timestamp);
    let message = escape(&insight.message);

    let (status_class, status_label) = match insight.status {
        InsightStatus::Critical => ("text-red-600", "Critical"),
        InsightStatus::Normal => ("text-green-600", "Normal"),
    };

    let alert_banner = if insight.status == InsightStatus::Critical {
        r#"<div class="mt-4 p-4 bg-red-100 border-l-4 border-red-600 text-red-800 rounded">
        <strong>Alert Sent:</strong> This result is critical. A clinician has been notified via the health alert queue.
      </div>"#
    } else {
        ""
    };

    let recommendations = if insight.recommendation.is_empty() {
        String::new()
    } else {
        let items: String = insight
            .recommendation
            .iter()
            .map(|r| format!("<li>{}</li>", escape(r)))
            .collect();
        format!(
            r#"<div class="mt-4">
        <p class="font-semibold text-gray-700">Recommendations:</p>
        <ul class="list-disc list-inside text-gray-600">{items}</ul>
      </div>"#
        )
    };

    format!(
        r#"<div class="bg-white rounded-xl shadow-lg p-6 mt-8 max-w-xl mx-auto">
      <h2 class="text-2xl font-bold text-blue-700 mb-4">Report Summary</h2>
      <ul class="text-gray-800 space-y-1">
        <li><strong>Patient ID:</strong> {patient_id}</li>
        <li><strong>Test Type:</strong> {test_type}</li>
        <li><strong>Value:</strong> {value} {unit}</li>
        <li><strong>Status:</strong> <span class="{status_class} font-semibold">{status_label}</span></li>
      </ul>
      {alert_banner}
      <div class="mt-4">
        <p class="font-semibold text-gray-700">Insight:</p>
        <p class="text-gray-600">{message}</p>
      </div>
      {recommendations}
      <div class="mt-6 text-sm text-gray-600">
        <p><strong>What happens next?</strong></p>
        <ul class="list-disc list-inside">
          <li>A clinician will review the result.</li>
          <li>If necessary, the patient will be contacted shortly.</li>
          <li>In case of symptoms, seek immediate care.</li>
        </ul>
        <p class="mt-2">Report time: {timestamp}</p>
      </div>
    </div>"#
    )
}

/// Rejection card for an incomplete extraction. Echoes the partial record
/// so staff can correct the source document.
pub fn incomplete_block(missing: &[&'static str], record_json: &str) -> String {
    let missing = escape(&missing.join(", "));
    let record_json = escape(record_json);
    format!(
        r#"<div class="bg-white rounded-xl shadow-lg p-6 mt-8 max-w-xl mx-auto">
      <h2 class="text-2xl font-bold text-red-700 mb-4">Report Rejected</h2>
      <p class="text-gray-800">The document is missing required fields: <strong>{missing}</strong>.</p>
      <p class="text-sm text-gray-600 mt-2">Fields extracted so far:</p>
      <pre class="mt-2 p-3 bg-gray-50 border border-gray-200 rounded text-xs text-gray-700 overflow-x-auto">{record_json}</pre>
      <p class="text-sm text-gray-600 mt-4">Correct the source document and submit it again. Nothing was forwarded to the alert queue.</p>
    </div>"#
    )
}

/// Generic error card.
pub fn error_block(message: &str) -> String {
    let message = escape(message);
    format!(
        r#"<div class="bg-white rounded-xl shadow-lg p-6 mt-8 max-w-xl mx-auto">
      <h2 class="text-2xl font-bold text-red-700 mb-4">Something went wrong</h2>
      <p class="text-gray-800">{message}</p>
    </div>"#
    )
}
