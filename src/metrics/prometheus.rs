//! Prometheus text exposition format.
//!
//! Renders samples into the text format (version 0.0.4) served on `/metrics`.

use super::descriptor::MetricDesc;
use super::sample::Sample;

/// `Content-Type` of the rendered exposition.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render samples grouped by family.
///
/// `# HELP` / `# TYPE` lines are written for every descriptor, even when it
/// has no samples. Samples whose family is not in `descriptors` are skipped.
pub fn render_prometheus(descriptors: &[&MetricDesc], samples: &[Sample]) -> String {
    let mut out = String::new();

    for desc in descriptors {
        out.push_str(&format!("# HELP {} {}\n", desc.name, escape_help(desc.help)));
        out.push_str(&format!("# TYPE {} gauge\n", desc.name));

        for sample in samples.iter().filter(|s| s.desc().name == desc.name) {
            out.push_str(desc.name);

            let labels: Vec<String> = sample
                .labels()
                .map(|(name, value)| format!("{}=\"{}\"", name, escape_label_value(value)))
                .collect();
            if !labels.is_empty() {
                out.push('{');
                out.push_str(&labels.join(","));
                out.push('}');
            }

            out.push(' ');
            out.push_str(&format_value(sample.value()));
            out.push('\n');
        }
    }

    out
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}
