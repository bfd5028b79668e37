use crate::preview::{LabelPreview, PartyBlock, RenderOptions};

/// Narrowest box that still fits the footer.
const MIN_WIDTH: usize = 24;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Total width of the label box in columns, borders included
    pub width: usize,

    /// Print address lines in capitals, like a thermal label
    pub uppercase: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { width: 44, uppercase: true }
    }
}

/// Plain text formatter for terminal and thermal-printer friendly labels
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Render a preview as a boxed text label
    pub fn convert(&self, preview: &LabelPreview, options: &RenderOptions) -> String {
        convert_to_text(preview, options, &self.config)
    }
}

/// Render a preview as a boxed text label with specified configuration
pub fn convert_to_text(preview: &LabelPreview, options: &RenderOptions, config: &TextConfig) -> String {
    let mut label = Label::new(config.width.max(MIN_WIDTH));

    label.rule();
    label.split("P", &format!("{} LBS", preview.weight));
    label.line("PRIORITY SHIP");
    label.rule();
    label.party(&preview.from_block(), config.uppercase);
    label.rule();
    label.party(&preview.to_block(), config.uppercase);
    label.rule();
    label.centered(&options.tracking_number);
    label.line("BILLING: P/P");
    label.split(&format!("DATE: {}", options.date_label()), &options.origin_code);
    label.rule();

    label.finish()
}

/// Accumulates the rows of a boxed label.
struct Label {
    inner: usize,
    rows: Vec<String>,
}

impl Label {
    fn new(width: usize) -> Self {
        Self { inner: width - 4, rows: Vec::new() }
    }

    fn rule(&mut self) {
        self.rows.push(format!("+{}+", "-".repeat(self.inner + 2)));
    }

    fn line(&mut self, text: &str) {
        let fitted = fit(text, self.inner);
        let pad = self.inner - fitted.chars().count();
        self.rows.push(format!("| {}{} |", fitted, " ".repeat(pad)));
    }

    fn centered(&mut self, text: &str) {
        let fitted = fit(text, self.inner);
        let free = self.inner - fitted.chars().count();
        let left = free / 2;
        self.rows.push(format!("| {}{}{} |", " ".repeat(left), fitted, " ".repeat(free - left)));
    }

    /// Left and right aligned text on one row. The left side gives way.
    fn split(&mut self, left: &str, right: &str) {
        let right = fit(right, self.inner);
        let right_len = right.chars().count();
        let room = self.inner.saturating_sub(right_len + 1);
        let left = fit(left, room);
        let pad = self.inner - right_len - left.chars().count();
        self.rows.push(format!("| {}{}{} |", left, " ".repeat(pad), right));
    }

    fn party(&mut self, block: &PartyBlock, uppercase: bool) {
        let case = |s: &str| if uppercase { s.to_uppercase() } else { s.to_string() };

        self.line(block.heading);
        self.line(&case(&block.name));
        self.line(&case(&block.street));
        self.line(&case(&block.locality));
        if !block.phone.is_empty() {
            self.line(&block.phone);
        }
        if let Some(country) = &block.country {
            self.line(&case(country));
        }
    }

    fn finish(self) -> String {
        let mut out = self.rows.join("\n");
        out.push('\n');
        out
    }
}

/// Truncate to `width` characters, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::dimension::label_sizes;
    use time::macros::date;

    fn options() -> RenderOptions {
        RenderOptions { date: date!(2026 - 10 - 18), ..Default::default() }
    }

    fn preview() -> LabelPreview {
        let receiver = Address {
            name: "Ali Khan".to_string(),
            street1: "House 123, Street 4".to_string(),
            city: "Islamabad".to_string(),
            state: String::new(),
            country: "Pakistan".to_string(),
            phone_number: "0300-1234567".to_string(),
        };
        LabelPreview { sender: Address::default(), receiver, weight: "2".to_string(), size: label_sizes()[0].clone() }
    }

    #[test]
    fn test_rows_have_equal_width() {
        let text = convert_to_text(&preview(), &options(), &TextConfig::default());
        for row in text.lines() {
            assert_eq!(row.chars().count(), 44, "row {:?}", row);
        }
    }

    #[test]
    fn test_contains_label_content() {
        let text = convert_to_text(&preview(), &options(), &TextConfig::default());
        assert!(text.contains("2 LBS"));
        assert!(text.contains("SENDER NAME"));
        assert!(text.contains("ALI KHAN"));
        assert!(text.contains("HOUSE 123, STREET 4"));
        assert!(text.contains("ISLAMABAD, ST"));
        assert!(text.contains("0300-1234567"));
        assert!(text.contains("PAKISTAN"));
        assert!(text.contains("1Z 999 AA1 01 2345 6784"));
        assert!(text.contains("DATE: Oct 18, 2026"));
    }

    #[test]
    fn test_keeps_case_when_asked() {
        let config = TextConfig { uppercase: false, ..Default::default() };
        let text = convert_to_text(&preview(), &options(), &config);
        assert!(text.contains("Ali Khan"));
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut p = preview();
        p.receiver.street1 = "A very long street line that will never fit on a narrow label".to_string();
        let text = convert_to_text(&p, &options(), &TextConfig { width: 30, uppercase: true });

        assert!(text.contains('…'));
        for row in text.lines() {
            assert_eq!(row.chars().count(), 30);
        }
    }

    #[test]
    fn test_width_clamped() {
        let text = convert_to_text(&preview(), &options(), &TextConfig { width: 5, uppercase: true });
        assert!(text.lines().all(|row| row.chars().count() == MIN_WIDTH));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello world", 6), "hello…");
        assert_eq!(fit("abc", 0), "");
    }
}
