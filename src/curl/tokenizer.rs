//! Shell-like splitting of a curl command line.

/// Fold a (possibly multi-line) command into one line.
///
/// Every physical line is trimmed and loses one trailing `\`, then the lines
/// are joined with single spaces. Joining happens before tokenizing, so a
/// quoted value that spans lines ends up with a space where the break was.
pub fn normalize(command: &str) -> String {
    let mut normalized = String::with_capacity(command.len());
    for line in command.split('\n') {
        let line = line.trim();
        let line = line.strip_suffix('\\').unwrap_or(line);
        normalized.push_str(line);
        normalized.push(' ');
    }
    normalized.trim().to_string()
}

/// Split on spaces and tabs outside quote spans.
///
/// A `'` or `"` opens a span that only the same character closes; the other
/// quote character is literal inside it. Quote characters that open or close
/// a span are dropped. An unterminated span simply runs to the end of input.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut quote: Option<char> = None;

    for c in command.chars() {
        match c {
            ' ' | '\t' => {
                if quote.is_some() {
                    token.push(c);
                } else if !token.is_empty() {
                    tokens.push(std::mem::take(&mut token));
                }
            }
            '\'' | '"' => match quote {
                Some(open) if open == c => quote = None,
                Some(_) => token.push(c),
                None => quote = Some(c),
            },
            _ => token.push(c),
        }
    }

    if !token.is_empty() {
        tokens.push(token);
    }
    tokens
}
