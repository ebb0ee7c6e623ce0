//! Product specification extraction from description HTML.
//!
//! The export mixes two unrelated micro-formats for the same four
//! attributes. Formats are tried in [`MicroFormat::PRIORITY`] order and are
//! never merged: the table format is consulted only when the structured
//! format produced nothing from any source.

use std::sync::LazyLock;

use regex::Regex;
use s4u_core::ProductSpecifications;

use crate::html::clean_html;

static STRUCTURED_DETECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<strong>Company:</strong>|<strong>Dosage:</strong>|<strong>Product pack:</strong>")
        .expect("valid structured detect regex")
});
static STRUCTURED_COMPANY_RE: LazyLock<Regex> =
    LazyLock::new(|| structured_label_regex(r"Company:"));
static STRUCTURED_DOSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| structured_label_regex(r"Dosage:"));
static STRUCTURED_PACK_RE: LazyLock<Regex> =
    LazyLock::new(|| structured_label_regex(r"Product pack:"));
static STRUCTURED_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| structured_label_regex(r"Content\s*\(active\)?:"));

static TABLE_DETECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<strong>ACTIVE\s+SUBSTANCE:</strong>|<strong>Usual\s+dosages?:</strong>")
        .expect("valid table detect regex")
});
static TABLE_ACTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| table_label_regex(r"ACTIVE\s+SUBSTANCE:"));
static TABLE_DOSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| table_label_regex(r"Usual\s+dosages?:"));
static TABLE_DETECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| table_label_regex(r"Detection\s+time:"));
static TABLE_ALT_NAMES_RE: LazyLock<Regex> =
    LazyLock::new(|| table_label_regex(r"ALTERNATIVE\s+STEROID\s+NAMES:"));

/// `<strong>Label</strong> value` where the value runs to the next
/// `<strong>` or end of input and may not contain another tag.
fn structured_label_regex(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)<strong>{label}</strong>\s*([^<]*)(?:<strong>|$)"))
        .expect("valid structured label regex")
}

/// `<strong>Label</strong></td><td ...>value</td>`.
fn table_label_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<strong>{label}</strong>\s*</td>\s*<td[^>]*>(.*?)</td>"
    ))
    .expect("valid table label regex")
}

/// The description micro-formats the export is known to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroFormat {
    /// Inline runs: `<strong>Company:</strong> Alpha Pharma<strong>Dosage:</strong> 10mg`.
    Structured,
    /// Two-column tables: `<strong>ACTIVE SUBSTANCE:</strong></td><td>Oxandrolone</td>`.
    ///
    /// `Detection time` lands in `product_pack` and the first alternative
    /// name in `company`; the storefront renders them under those labels.
    Table,
}

impl MicroFormat {
    pub const PRIORITY: [MicroFormat; 2] = [MicroFormat::Structured, MicroFormat::Table];

    /// Cheap check for whether `html` contains this format's labels.
    #[must_use]
    pub fn detect(self, html: &str) -> bool {
        match self {
            MicroFormat::Structured => STRUCTURED_DETECT_RE.is_match(html),
            MicroFormat::Table => TABLE_DETECT_RE.is_match(html),
        }
    }

    #[must_use]
    pub fn extract(self, html: &str) -> ProductSpecifications {
        match self {
            MicroFormat::Structured => extract_structured(html),
            MicroFormat::Table => extract_table(html),
        }
    }

    /// Whether `specs` is good enough to stop scanning further sources.
    fn satisfied_by(self, specs: &ProductSpecifications) -> bool {
        match self {
            MicroFormat::Structured => specs.is_complete(),
            MicroFormat::Table => !specs.is_empty(),
        }
    }
}

/// Extracts specifications from a product's short description and content.
///
/// The structured format is applied to every source that contains it, later
/// sources overwriting the fields they carry, until all four fields are
/// filled. Only if that leaves every field empty is the table format tried,
/// stopping at the first source that yields any field.
#[must_use]
pub fn extract_specifications(
    short_description: Option<&str>,
    content: Option<&str>,
) -> ProductSpecifications {
    let sources: Vec<&str> = [short_description, content]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    let mut specs = ProductSpecifications::default();
    for format in MicroFormat::PRIORITY {
        if !specs.is_empty() {
            break;
        }
        for html in &sources {
            if !format.detect(html) {
                continue;
            }
            specs.merge(format.extract(html));
            if format.satisfied_by(&specs) {
                break;
            }
        }
    }
    specs
}

/// `true` when at least one of the four fields is present.
#[must_use]
pub fn has_specifications(specs: &ProductSpecifications) -> bool {
    !specs.is_empty()
}

fn extract_structured(html: &str) -> ProductSpecifications {
    ProductSpecifications {
        company: capture_clean(&STRUCTURED_COMPANY_RE, html),
        dosage: capture_clean(&STRUCTURED_DOSAGE_RE, html),
        product_pack: capture_clean(&STRUCTURED_PACK_RE, html),
        content: capture_clean(&STRUCTURED_CONTENT_RE, html),
    }
}

fn extract_table(html: &str) -> ProductSpecifications {
    // Alternative names are a comma list; the first entry doubles as company.
    let company = capture_clean(&TABLE_ALT_NAMES_RE, html).and_then(|names| {
        names
            .split(',')
            .next()
            .map(str::trim)
            .filter(|first| !first.is_empty())
            .map(str::to_string)
    });

    ProductSpecifications {
        company,
        dosage: capture_clean(&TABLE_DOSAGE_RE, html),
        product_pack: capture_clean(&TABLE_DETECTION_RE, html),
        content: capture_clean(&TABLE_ACTIVE_RE, html),
    }
}

fn capture_clean(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| clean_html(m.as_str()))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "specs_test.rs"]
mod tests;
