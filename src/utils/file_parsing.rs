/// ARFF quoting: `'` or `"` protect delimiters and are kept in the tokens.
pub fn split_preserving_quotes(line: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
                current.push(ch);
            }
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                current.push(ch);
            }
            None if ch == delimiter => tokens.push(std::mem::take(&mut current)),
            None => current.push(ch),
        }
    }
    tokens.push(current);
    tokens
}

pub fn split_csv_preserving_quotes(line: &str) -> Vec<String> {
    split_preserving_quotes(line, ',')
}

/// `'a b'` and `"a b"` become `a b`; anything else is returned as is.
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let s = s.trim();
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

pub fn is_comment_or_empty(s: &str, comment: char) -> bool {
    let t = s.trim();
    t.is_empty() || t.starts_with(comment)
}
