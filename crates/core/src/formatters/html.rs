//! Printable HTML output.
//!
//! The document is self-contained: inline CSS, no scripts except the
//! optional print trigger. Printing it from a browser produces a page of
//! exactly the label size.

use std::fmt::Write;

use crate::preview::{LabelPreview, PartyBlock, RenderOptions};

/// Configuration for HTML output
#[derive(Debug, Clone, Default)]
pub struct HtmlConfig {
    /// Open the print dialog as soon as the page loads
    pub auto_print: bool,
}

/// HTML formatter with configurable options
pub struct HtmlFormatter {
    config: HtmlConfig,
}

impl HtmlFormatter {
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, preview: &LabelPreview, options: &RenderOptions) -> String {
        convert_to_html(preview, options, &self.config)
    }
}

/// Render a preview as a standalone printable HTML document
pub fn convert_to_html(preview: &LabelPreview, options: &RenderOptions, config: &HtmlConfig) -> String {
    let size = &preview.size;
    let css_size = size.css_size();
    let (width, height) = css_size.split_once(' ').unwrap_or((css_size.as_str(), css_size.as_str()));

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Shipping Label ({})</title>", escape_html(size.name));
    let _ = writeln!(
        html,
        "<style>\n{}\n@media print {{\n  @page {{ size: {}; margin: 0; }}\n  body {{ background: #fff; }}\n  #label {{ width: {} !important; height: {} !important; box-shadow: none; }}\n}}\n</style>",
        BASE_CSS, css_size, width, height
    );
    html.push_str("</head>\n");

    if config.auto_print {
        html.push_str("<body onload=\"window.print()\">\n");
    } else {
        html.push_str("<body>\n");
    }

    let _ = writeln!(html, "<div id=\"label\" style=\"width: {}; height: {};\">", width, height);

    let _ = writeln!(
        html,
        "<header><div><div class=\"service\">P</div><div class=\"small\">Priority Ship</div></div>\
         <div class=\"weight\"><div class=\"big\">{}</div><div class=\"small\">Lbs</div></div></header>",
        escape_html(&preview.weight)
    );

    write_party(&mut html, "from", &preview.from_block());
    write_party(&mut html, "to", &preview.to_block());

    html.push_str("<footer>\n");
    let _ = writeln!(html, "<div class=\"barcode\">{}</div>", barcode_bars(&options.tracking_number));
    let _ = writeln!(html, "<div class=\"tracking\">{}</div>", escape_html(&options.tracking_number));
    let _ = writeln!(
        html,
        "<div class=\"meta\"><div class=\"small\"><div>BILLING: P/P</div><div>DATE: {}</div></div><div class=\"origin\">{}</div></div>",
        escape_html(&options.date_label()),
        escape_html(&options.origin_code)
    );
    html.push_str("</footer>\n</div>\n</body>\n</html>\n");

    html
}

const BASE_CSS: &str = "body { margin: 0; font-family: Helvetica, Arial, sans-serif; background: #e2e8f0; }
#label { box-sizing: border-box; margin: 0 auto; background: #fff; color: #000; border: 2px solid #000; display: flex; flex-direction: column; overflow: hidden; }
header { display: flex; justify-content: space-between; padding: 0.15in; border-bottom: 4px solid #000; }
.service { font-size: 32pt; font-weight: bold; }
.big { font-size: 36pt; font-weight: bold; font-family: monospace; text-align: right; }
.small { font-size: 8pt; font-weight: bold; text-transform: uppercase; }
.party { padding: 0.1in 0.15in; text-transform: uppercase; }
.party .heading { font-weight: bold; color: #475569; }
.from { font-size: 8pt; border-bottom: 1px solid #000; }
.from .name { font-weight: bold; }
.to { flex-grow: 1; display: flex; flex-direction: column; justify-content: center; border-bottom: 4px solid #000; }
.to .name { font-size: 18pt; font-weight: bold; }
.to .street, .to .locality { font-size: 14pt; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.phone { font-family: monospace; }
footer { padding: 0.15in; }
.barcode { height: 0.6in; display: flex; align-items: flex-end; justify-content: center; gap: 2px; overflow: hidden; }
.barcode span { background: #000; display: block; }
.tracking { text-align: center; font-family: monospace; font-weight: bold; letter-spacing: 0.2em; }
.meta { display: flex; justify-content: space-between; align-items: flex-end; border-top: 2px solid #000; margin-top: 0.05in; padding-top: 0.05in; }
.origin { font-size: 22pt; font-weight: bold; }";

fn write_party(html: &mut String, class: &str, block: &PartyBlock) {
    let _ = writeln!(html, "<section class=\"party {}\">", class);
    let _ = writeln!(html, "<div class=\"heading\">{}</div>", escape_html(block.heading));
    let _ = writeln!(html, "<div class=\"name\">{}</div>", escape_html(&block.name));
    let _ = writeln!(html, "<div class=\"street\">{}</div>", escape_html(&block.street));
    let _ = writeln!(html, "<div class=\"locality\">{}</div>", escape_html(&block.locality));
    if !block.phone.is_empty() {
        let _ = writeln!(html, "<div class=\"phone\">{}</div>", escape_html(&block.phone));
    }
    if let Some(country) = &block.country {
        let _ = writeln!(html, "<div class=\"country\">{}</div>", escape_html(country));
    }
    html.push_str("</section>\n");
}

/// Decorative bars derived from the tracking number. Not a scannable symbology.
fn barcode_bars(seed: &str) -> String {
    let mut state: u32 = seed.bytes().fold(2166136261, |h, b| (h ^ u32::from(b)).wrapping_mul(16777619));
    let mut out = String::with_capacity(60 * 48);
    for _ in 0..60 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let height = 40 + state % 60;
        let width = 2 + (state >> 8) % 6;
        let _ = write!(out, "<span style=\"height:{}%;width:{}px\"></span>", height, width);
    }
    out
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::dimension::label_sizes;
    use time::macros::date;

    fn preview() -> LabelPreview {
        LabelPreview {
            sender: Address::default(),
            receiver: Address { name: "Ali <Khan> & Sons".to_string(), ..Address::default() },
            weight: "1".to_string(),
            size: label_sizes()[1].clone(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions { date: date!(2026 - 10 - 18), ..Default::default() }
    }

    #[test]
    fn test_page_size_rule() {
        let html = convert_to_html(&preview(), &options(), &HtmlConfig::default());
        assert!(html.contains("@page { size: 4in 4in; margin: 0; }"));
        assert!(html.contains("width: 4in; height: 4in;"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_content_is_escaped() {
        let html = convert_to_html(&preview(), &options(), &HtmlConfig::default());
        assert!(html.contains("Ali &lt;Khan&gt; &amp; Sons"));
        assert!(!html.contains("<Khan>"));
    }

    #[test]
    fn test_auto_print() {
        let plain = convert_to_html(&preview(), &options(), &HtmlConfig::default());
        assert!(!plain.contains("window.print()"));

        let printing = convert_to_html(&preview(), &options(), &HtmlConfig { auto_print: true });
        assert!(printing.contains("<body onload=\"window.print()\">"));
    }

    #[test]
    fn test_barcode_is_deterministic() {
        assert_eq!(barcode_bars("1Z 999"), barcode_bars("1Z 999"));
        assert_ne!(barcode_bars("1Z 999"), barcode_bars("1Z 998"));
        assert_eq!(barcode_bars("x").matches("<span").count(), 60);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
