//! Line tokenizer for the catalog CSV dialect
//!
//! A double quote toggles quoted mode and is dropped; a comma splits fields only
//! outside quotes. Escaped quotes are not supported.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Split one line into its fields
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}
