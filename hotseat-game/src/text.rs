//! Decoding for the HTML-escaped text emitted by trivia feeds.

/// Named entities the trivia feed is known to emit.
const NAMED_ENTITIES: [(&str, &str); 12] = [
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("hellip", "\u{2026}"),
    ("ndash", "\u{2013}"),
];

fn lookup_named(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, replacement)| *replacement)
}

fn decode_numeric(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Decode HTML entities in place, leaving unrecognized sequences as-is.
#[must_use]
pub fn decode_html(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let replaced = tail.find(';').and_then(|end| {
            let body = &tail[..end];
            let replacement = if let Some(numeric) = body.strip_prefix('#') {
                decode_numeric(numeric).map(|c| c.to_string())
            } else {
                lookup_named(body).map(str::to_string)
            };
            replacement.map(|text| (text, &tail[end + 1..]))
        });
        match replaced {
            Some((text, remainder)) => {
                decoded.push_str(&text);
                rest = remainder;
            }
            None => {
                decoded.push('&');
                rest = tail;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}
