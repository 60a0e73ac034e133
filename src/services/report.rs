//! Static HTML report rendering
//!
//! Four fixed sections: Daily Bottoms, Weekly Bottoms, Daily Tops, Weekly
//! Tops. Each renders as a two-column table sorted by ticker, with a
//! "No signals." placeholder when empty. Thirteen counts get bold weight,
//! tops a red family, bottoms a green family. Writing the document to disk
//! is the caller's job.

use crate::models::{ScanResult, SignalHit, SignalKind};

/// Row background + weight for one signal kind
fn row_style(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Dm9Top => "background-color: #f8d7da;",
        SignalKind::Dm13Top => "background-color: #f5c6cb; font-weight: bold;",
        SignalKind::Dm9Bot => "background-color: #d4edda;",
        SignalKind::Dm13Bot => "background-color: #c3e6cb; font-weight: bold;",
    }
}

/// Render one hit list as a table, or the empty placeholder
fn signals_table(hits: &[SignalHit]) -> String {
    if hits.is_empty() {
        return "<p>No signals.</p>".to_string();
    }

    let mut html = String::from("<table><tr><th>Ticker</th><th>Signal</th></tr>");
    for hit in hits {
        html.push_str(&format!(
            "<tr><td>{}</td><td style='{}'>{}</td></tr>",
            hit.ticker,
            row_style(hit.kind),
            hit.kind
        ));
    }
    html.push_str("</table>");
    html
}

/// Render the full report document
pub fn render_report(daily: &ScanResult, weekly: &ScanResult) -> String {
    format!(
        r#"<html>
<head>
    <meta charset="UTF-8">
    <title>DeMark Signal Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        h1 {{ color: #333; }}
        table {{ width: 100%; border-collapse: collapse; margin-top: 10px; }}
        th, td {{ border: 1px solid #ccc; padding: 6px 8px; text-align: left; }}
        th {{ background-color: #f0f0f0; }}
    </style>
</head>
<body>
    <h1>🧭 DeMark Signal Report</h1>

    <h2>Daily Bottoms</h2>
    {daily_bottoms}

    <h2>Weekly Bottoms</h2>
    {weekly_bottoms}

    <h2>Daily Tops</h2>
    {daily_tops}

    <h2>Weekly Tops</h2>
    {weekly_tops}
</body>
</html>
"#,
        daily_bottoms = signals_table(&daily.bottoms),
        weekly_bottoms = signals_table(&weekly.bottoms),
        daily_tops = signals_table(&daily.tops),
        weekly_tops = signals_table(&weekly.tops),
    )
}
