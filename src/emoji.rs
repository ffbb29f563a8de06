/// Glyph for a GitHub/gemoji shortcode given without the colons.
fn lookup(shortcode: &str) -> Option<&'static str> {
    emojis::get_by_shortcode(shortcode).map(emojis::Emoji::as_str)
}

fn is_shortcode(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}

/// Replaces known `:shortcode:` tokens with their emoji.
///
/// Unknown shortcodes and stray colons are left as written.
pub fn convert_emojis(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(':') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let glyph = after
            .find(':')
            .map(|end| &after[..end])
            .filter(|code| is_shortcode(code))
            .and_then(|code| lookup(code).map(|glyph| (glyph, code.len())));

        match glyph {
            Some((glyph, len)) => {
                output.push_str(glyph);
                rest = &after[len + 1..];
            }
            None => {
                // keep the colon; it may open the next shortcode
                output.push(':');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
