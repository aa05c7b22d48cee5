//! Volatile-field extraction from programme-page HTML
//!
//! Pages put fees and intake dates in tables as often as in prose, so the
//! extractor flattens headings, paragraphs, list items and table rows into
//! text lines first, then pattern-matches the fields out of those lines.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use cora_core::{Fee, LiveUpdate};

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, p, li").expect("static selector"));
static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("static selector"));

// Fees are advertised Singapore-style, e.g. "S$4,280.00" or "S$ 980".
static FEE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S\$\s*([0-9][0-9,]*(?:\.[0-9]{2})?)").expect("static regex"));
// Day-month-year dates, e.g. "6 October 2025" or "6 Oct 2025".
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\b").expect("static regex"));
static INTAKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)intake").expect("static regex"));

/// Headings that end an entry-requirements block.
const SECTION_BREAKS: [&str; 6] = [
    "fee",
    "intake",
    "schedule",
    "duration",
    "course date",
    "apply",
];

pub(crate) fn extract_update(html: &str) -> LiveUpdate {
    let lines = page_lines(html);
    let text = lines.join("\n");

    LiveUpdate {
        fee: extract_fee(&text),
        next_intake: extract_intake(&text),
        entry_requirements: extract_requirements(&lines),
    }
}

/// Flatten the page into text lines: headings, paragraphs and list items
/// verbatim, table rows as pipe-joined cells.
fn page_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for element in document.select(&BODY_SELECTOR) {
        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            lines.push(text);
        }
    }

    for table in document.select(&TABLE_SELECTOR) {
        for row in table.select(&ROW_SELECTOR) {
            let cells: Vec<String> = row
                .select(&CELL_SELECTOR)
                .map(|cell| {
                    cell.text()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            if cells.iter().any(|c| !c.is_empty()) {
                lines.push(cells.join("|"));
            }
        }
    }

    lines
}

fn extract_fee(text: &str) -> Option<Fee> {
    let captures = FEE_RE.captures(text)?;
    let amount: f64 = captures[1].replace(',', "").parse().ok()?;
    Some(Fee {
        amount,
        currency: "SGD".to_string(),
    })
}

/// The next intake date: the first parseable day-month-year date that
/// follows an "intake" mention closely enough to belong to it.
fn extract_intake(text: &str) -> Option<NaiveDate> {
    for found in DATE_RE.find_iter(text) {
        let keyword_nearby = INTAKE_RE
            .find_iter(&text[..found.start()])
            .last()
            .is_some_and(|m| found.start() - m.start() <= 120);
        if keyword_nearby {
            if let Some(date) = parse_date(found.as_str()) {
                return Some(date);
            }
        }
    }
    None
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d %b %Y"))
        .ok()
}

/// The entry-requirements block: the heading line's own content when it has
/// any, otherwise the lines that follow it up to the next section heading.
fn extract_requirements(lines: &[String]) -> Option<String> {
    let heading = lines
        .iter()
        .position(|line| line.to_lowercase().contains("entry requirement"))?;

    if let Some((_, rest)) = lines[heading].split_once(':') {
        let rest = rest.trim();
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }

    let mut collected = Vec::new();
    for line in lines.iter().skip(heading + 1).take(4) {
        let lowered = line.to_lowercase();
        if SECTION_BREAKS.iter().any(|b| lowered.contains(b)) {
            break;
        }
        collected.push(line.as_str());
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1>Specialist Diploma in Construction Management</h1>
          <p>A part-time programme for working professionals.</p>
          <h2>Entry Requirements</h2>
          <p>A recognised diploma in a built-environment discipline.</p>
          <p>At least two years of relevant industry experience.</p>
          <h2>Fees and Intakes</h2>
          <table>
            <tr><th>Course Fee</th><td>S$4,280.00</td></tr>
            <tr><th>Next Intake</th><td>6 October 2025</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn extracts_fee_from_table() {
        let update = extract_update(PAGE);
        let fee = update.fee.unwrap();
        assert_eq!(fee.amount, 4280.0);
        assert_eq!(fee.currency, "SGD");
    }

    #[test]
    fn extracts_intake_date_near_keyword() {
        let update = extract_update(PAGE);
        assert_eq!(
            update.next_intake,
            Some(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap())
        );
    }

    #[test]
    fn extracts_requirements_block() {
        let update = extract_update(PAGE);
        let requirements = update.entry_requirements.unwrap();
        assert!(requirements.contains("recognised diploma"));
        assert!(requirements.contains("two years"));
        // The following fees section must not bleed in.
        assert!(!requirements.contains("S$"));
    }

    #[test]
    fn abbreviated_month_parses() {
        let html = "<p>Intake: 14 Jan 2026</p>";
        let update = extract_update(html);
        assert_eq!(
            update.next_intake,
            Some(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap())
        );
    }

    #[test]
    fn dates_without_an_intake_mention_are_ignored() {
        let html = "<p>Published on 1 March 2024.</p>";
        let update = extract_update(html);
        assert_eq!(update.next_intake, None);
    }

    #[test]
    fn requirements_on_the_heading_line_itself() {
        let html = "<p>Entry Requirements: a relevant degree</p>";
        let update = extract_update(html);
        assert_eq!(
            update.entry_requirements.as_deref(),
            Some("a relevant degree")
        );
    }

    #[test]
    fn page_without_recognizable_fields_yields_empty_update() {
        let update = extract_update("<p>Nothing of note here.</p>");
        assert!(update.is_empty());
    }

    #[test]
    fn fee_without_cents_parses() {
        let update = extract_update("<p>Full fee: S$ 980 after funding</p>");
        assert_eq!(update.fee.unwrap().amount, 980.0);
    }
}
