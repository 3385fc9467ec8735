//! Text clean-up for snippet bodies: entity unescaping and line splitting

use quick_xml::escape::resolve_html5_entity;
use std::borrow::Cow;

/// Longest entity name we try to resolve (`&CounterClockwiseContourIntegral;`)
const MAX_ENTITY_LEN: usize = 32;

/// Named references that HTML also accepts without the closing `;`
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Decode HTML character references (`&lt;`, `&#60;`, `&#x3C;`)
///
/// Numeric references and the legacy named references (`&lt`, `&amp`, ...)
/// are also decoded without the closing `;`. A legacy name directly followed
/// by a letter or digit is left alone, as HTML does inside attribute values,
/// so C++ such as `&amount` or `&notify` survives.
///
/// Unlike strict XML unescaping this never fails: a lone `&`, an unknown name
/// or an invalid code point is kept verbatim, which matters for code such as
/// `a && b`.
pub fn unescape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = match after.strip_prefix('#') {
            Some(number) => decode_numeric(number).map(|(c, used)| (Cow::Owned(c.to_string()), used + 1)),
            None => decode_named(after),
        };

        match decoded {
            Some((replacement, used)) => {
                out.push_str(&replacement);
                rest = &after[used..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode the digits after `&#`, returning the character and the bytes consumed
fn decode_numeric(number: &str) -> Option<(char, usize)> {
    let (digits_at, radix) = match number.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };
    let digits = &number[digits_at..];
    let len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }

    let code = u32::from_str_radix(&digits[..len], radix).ok()?;
    let c = char::from_u32(code)?;
    let terminated = digits[len..].starts_with(';');
    Some((c, digits_at + len + usize::from(terminated)))
}

/// Decode a named reference at the start of `after`, returning the text and the bytes consumed
fn decode_named(after: &str) -> Option<(Cow<'static, str>, usize)> {
    let name_len = after
        .char_indices()
        .take(MAX_ENTITY_LEN)
        .find(|&(_, c)| !c.is_ascii_alphanumeric())
        .map(|(idx, _)| idx)
        .unwrap_or_else(|| after.len().min(MAX_ENTITY_LEN));
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];

    if after[name_len..].starts_with(';') {
        if let Some(resolved) = resolve_html5_entity(name) {
            return Some((Cow::Borrowed(resolved), name_len + 1));
        }
    }

    // Legacy form: the whole name, with nothing alphanumeric glued to it
    if LEGACY_ENTITIES.contains(&name) {
        return resolve_html5_entity(name).map(|resolved| (Cow::Borrowed(resolved), name_len));
    }

    None
}

/// Convert `\r\n` and bare `\r` to `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Unescape, normalize line endings and split into body lines
///
/// A value without line breaks yields exactly one line (possibly empty).
pub fn to_body_lines(value: &str) -> Vec<String> {
    let unescaped = unescape_entities(value);
    normalize_line_endings(&unescaped)
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unescape_named_and_numeric() {
        assert_eq!(unescape_entities("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
        assert_eq!(unescape_entities("&quot;x&quot; &#39;y&#39;"), "\"x\" 'y'");
        assert_eq!(unescape_entities("&#60;&#x3C;&#X3c;"), "<<<");
        assert_eq!(unescape_entities("&nbsp;").as_ref(), "\u{a0}");
    }

    #[test]
    fn test_unescape_is_lenient() {
        assert_eq!(unescape_entities("a && b"), "a && b");
        assert_eq!(unescape_entities("x &unknown; y"), "x &unknown; y");
        assert_eq!(unescape_entities("trailing &"), "trailing &");
        assert_eq!(unescape_entities("&#xZZ; &#; &;"), "&#xZZ; &#; &;");
        assert_eq!(unescape_entities("&#+60;"), "&#+60;");
        assert_eq!(unescape_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_unescape_accepts_missing_semicolon() {
        assert_eq!(unescape_entities("a &lt b &gt c"), "a < b > c");
        assert_eq!(unescape_entities("x &amp y"), "x & y");
        assert_eq!(unescape_entities("&lt&gt"), "<>");
        assert_eq!(unescape_entities("&#60 &#x3C!"), "< <!");
        assert_eq!(unescape_entities("end &quot"), "end \"");
    }

    #[test]
    fn test_unescape_keeps_identifiers_after_ampersand() {
        assert_eq!(unescape_entities("f(&amount, &notify)"), "f(&amount, &notify)");
        assert_eq!(unescape_entities("&register &ltr"), "&register &ltr");
        // Only the legacy names may drop the semicolon
        assert_eq!(unescape_entities("&hellip &hellip;"), "&hellip \u{2026}");
    }

    #[test]
    fn test_unescape_without_ampersand_borrows() {
        assert!(matches!(unescape_entities("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_body_lines() {
        assert_eq!(to_body_lines("single"), vec!["single"]);
        assert_eq!(to_body_lines(""), vec![""]);
        assert_eq!(to_body_lines("a\r\nb\n"), vec!["a", "b", ""]);
        assert_eq!(to_body_lines("if (a &lt; b) {&#10;}"), vec!["if (a < b) {", "}"]);
    }

    proptest! {
        #[test]
        fn prop_line_split_round_trips(value in "[ab\r\n]{0,30}") {
            let lines = to_body_lines(&value);
            let joined = lines.join("\n");
            prop_assert_eq!(normalize_line_endings(&joined).into_owned(), joined.clone());
            prop_assert_eq!(to_body_lines(&joined), lines);
        }
    }
}
