//! Text preparation: font-safe characters and word wrapping.

/// Replace characters the standard PDF fonts cannot encode.
///
/// Typographic quotes, dashes and ellipses become their ASCII forms; other
/// Latin-1 characters pass through; everything else becomes `?`.
///
/// ```
/// use dreamtales_render::sanitize;
///
/// assert_eq!(sanitize("\u{201C}Hi\u{201D} \u{2014} caf\u{e9}\u{2026}"), "\"Hi\" - caf\u{e9}...");
/// assert_eq!(sanitize("bunny \u{1F430}"), "bunny ?");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\r' => {}
            '\t' | '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' => out.push(' '),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                out.push('-')
            }
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' => out.push('*'),
            c if c.is_control() => {}
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Greedy word wrap at `width` characters.
///
/// Blank lines in the input survive as empty lines, runs of spaces collapse,
/// and words longer than `width` are split. No returned line is longer than
/// `width` characters. A `width` of zero is treated as one.
///
/// ```
/// use dreamtales_render::wrap_text;
///
/// let lines = wrap_text("The moon hummed softly.\n\nGoodnight.", 10);
/// assert_eq!(lines, vec!["The moon", "hummed", "softly.", "", "Goodnight."]);
/// ```
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.trim().lines() {
        if paragraph.trim().is_empty() {
            if lines.last().is_some_and(|l: &String| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len <= width {
                current.push_str(word);
                current_len = word_len;
                continue;
            }

            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}
