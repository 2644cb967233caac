//! HTML rendering of the dashboard page

use super::state::{Dashboard, ServiceState};
use crate::nutrition::{FoodRecord, NutrientField};
use crate::pipeline::DashboardViews;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
    figure{margin:0 0 2rem 0}img{max-width:100%;border:1px solid #ddd}\
    table{border-collapse:collapse;margin-bottom:2rem}\
    th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:right}\
    th:first-child,td:first-child{text-align:left}\
    .unavailable{padding:1rem;border:1px solid #d62728;background:#fdecea}";

/// Full page for the current service state
pub fn render_page(state: &ServiceState) -> String {
    let mut body = String::new();
    match state {
        ServiceState::Ready(dashboard) => render_ready(&mut body, dashboard),
        ServiceState::Unavailable { kind, reason } => {
            body.push_str(&format!(
                "<div class=\"unavailable\" data-state=\"{}\"><h2>Data unavailable</h2>\
                 <p>The nutrition dataset could not be processed at startup, so no charts \
                 were generated.</p><p><code>{}</code></p></div>",
                kind.as_str(),
                escape_html(reason)
            ));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Dashboard Gizi</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>Dashboard Gizi</h1>\n{}\n</body>\n</html>\n",
        STYLE, body
    )
}

fn render_ready(out: &mut String, dashboard: &Dashboard) {
    for artifact in dashboard.artifact_refs() {
        out.push_str(&format!(
            "<figure id=\"{}\"><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
            artifact.key,
            artifact.src(),
            escape_html(artifact.title),
            escape_html(artifact.title)
        ));
    }
    render_tables(out, &dashboard.views);
}

fn render_tables(out: &mut String, views: &DashboardViews) {
    out.push_str("<h2>Rata-rata per kategori</h2>\n<table><tr><th>Kategori</th><th>Jumlah baris</th>");
    push_nutrient_headers(out);
    out.push_str("</tr>\n");
    for category in &views.comparison.categories {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>",
            escape_html(&category.label),
            category.matched
        ));
        for field in NutrientField::ALL {
            out.push_str(&format!("<td>{}</td>", format_value(category.means.get(field))));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    records_table(out, "Top kalori", &views.top_calories.records);
    records_table(out, "Total gizi makanan populer", &views.popular_foods.totals);
    records_table(out, "Top lemak", &views.top_fat.records);
}

fn records_table(out: &mut String, heading: &str, records: &[FoodRecord]) {
    out.push_str(&format!("<h2>{}</h2>\n<table><tr><th>Nama</th>", escape_html(heading)));
    push_nutrient_headers(out);
    out.push_str("</tr>\n");
    for record in records {
        out.push_str(&format!("<tr><td>{}</td>", escape_html(&record.name)));
        for field in NutrientField::ALL {
            out.push_str(&format!("<td>{}</td>", format_value(record.value(field))));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

fn push_nutrient_headers(out: &mut String) {
    for field in NutrientField::ALL {
        out.push_str(&format!("<th>{}</th>", field.column()));
    }
}

/// Two decimals; NaN shown as a dash
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn escape_html(text: &str) -> String {
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
