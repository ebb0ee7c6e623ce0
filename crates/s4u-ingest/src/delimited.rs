//! Comma-separated export tokenizer.
//!
//! Two entry points with deliberately different rules:
//!
//! - [`parse_records`] reads a whole export in which quoted fields may hold
//!   commas and literal newlines, so one record can span several physical
//!   lines. A record is emitted only once its accumulated field count equals
//!   the header's; anything left over at end of input is dropped.
//! - [`parse_line`] tokenizes exactly one physical line and trims every
//!   field. It parses the header row and the single-line category export.
//!
//! No type coercion happens here; every value stays a string.

/// One data row: column name to raw value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Pairs `values` with `headers` by position.
    ///
    /// Missing trailing values become `""`. When a header name repeats, the
    /// column keeps its first position and takes the later value.
    #[must_use]
    pub fn from_values(headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let mut fields: Vec<(String, String)> = Vec::with_capacity(headers.len());
        for header in headers {
            let value = values.next().unwrap_or_default();
            if let Some(slot) = fields.iter_mut().find(|(name, _)| name == header) {
                slot.1 = value;
            } else {
                fields.push((header.clone(), value));
            }
        }
        Self { fields }
    }

    /// Returns the raw value for `column`, if the header declared it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses a full export (header line plus data rows) into records.
///
/// Quote handling for data rows: inside quotes a `""` pair yields one
/// literal `"`; any other `"` toggles the in-quotes state, so an empty
/// quoted field `""` is the empty string. Commas and line breaks inside
/// quotes are kept as field content. Lines are split on `\n` only, so a
/// CRLF export keeps its `\r` at the end of each row's last field.
///
/// Never fails: malformed input produces fewer records, and an export
/// without data rows produces none.
#[must_use]
pub fn parse_records(content: &str) -> Vec<RawRecord> {
    let mut lines = content.split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = parse_line(header_line);

    let mut records = Vec::new();
    let mut current_record: Vec<String> = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;

    for line in lines {
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current_field.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => current_record.push(std::mem::take(&mut current_field)),
                _ => current_field.push(c),
            }
        }

        if in_quotes {
            current_field.push('\n');
        } else if !current_field.is_empty() || !current_record.is_empty() {
            current_record.push(std::mem::take(&mut current_field));
            if current_record.len() == headers.len() {
                records.push(RawRecord::from_values(
                    &headers,
                    std::mem::take(&mut current_record),
                ));
            }
        }
    }

    // Input that ends without a newline, or inside an unterminated quote.
    if !current_field.is_empty() || !current_record.is_empty() {
        current_record.push(current_field);
        if current_record.len() == headers.len() {
            records.push(RawRecord::from_values(&headers, current_record));
        }
    }

    records
}

/// Tokenizes a single physical line into trimmed fields.
///
/// Quotes follow the same rules as [`parse_records`]; unlike it, every
/// field is trimmed and a line break always ends the row.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if inside_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => {
                result.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    result.push(current.trim().to_string());
    result
}

#[cfg(test)]
#[path = "delimited_test.rs"]
mod tests;
