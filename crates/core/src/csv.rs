//! Delimited record helpers for student lists pasted or downloaded as CSV.
//!
//! Tokenizing never fails: malformed quoting degrades to a best-effort split
//! rather than an error.

/// Split one CSV line into fields.
///
/// - `""` is an escaped quote and yields a literal `"`.
/// - A lone `"` toggles quoted mode and is not part of the field.
/// - `,` separates fields outside quotes and is data inside them.
/// - Interior fields are kept verbatim; only the final field is trimmed.
///
/// An unterminated quote simply runs to the end of the line.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote.
                    current.push('"');
                    chars.next();
                } else {
                    in_quote = !in_quote;
                }
            }
            ',' if !in_quote => {
                result.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    result.push(current.trim().to_string());
    result
}

/// Tokenize every line of `text`, dropping lines whose fields are all empty.
///
/// Lines may end in `\n` or `\r\n`.
pub fn parse_table(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(tokenize_line)
        .filter(|fields| fields.iter().any(|f| !f.is_empty()))
        .collect()
}
