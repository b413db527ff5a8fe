//! Character reference decoding and escaping.
//!
//! Only the named references that occur in practice in the markup we consume
//! (`amp`, `lt`, `gt`, `quot`, `apos`) plus decimal/hex numeric references
//! are decoded. Unknown references pass through verbatim rather than erroring.

use memchr::memchr;

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

fn numeric_entity(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

// References longer than this cannot be one we decode; bounding the scan
// keeps a stray '&' from forcing a search to the end of the input.
const MAX_REFERENCE_LEN: usize = 10;

/// Decode character references in `input`. Returns the input unchanged
/// (allocation aside) when no '&' is present.
pub fn decode_entities(input: &str) -> String {
    if memchr(b'&', input.as_bytes()).is_none() {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Scan for ';' by byte within the window; '&' and ';' are ASCII, so
        // every slice endpoint below stays on a UTF-8 boundary.
        let window = &tail.as_bytes()[1..tail.len().min(MAX_REFERENCE_LEN + 2)];
        match memchr(b';', window) {
            Some(semi) if semi > 0 => {
                let body = &tail[1..1 + semi];
                let decoded = if let Some(num) = body.strip_prefix('#') {
                    numeric_entity(num)
                } else {
                    named_entity(body)
                };
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        rest = &tail[1 + semi + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text content for serialization.
pub fn escape_text(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a double-quoted attribute value for serialization.
pub fn escape_attr(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_passes_plain_text_through() {
        assert_eq!(decode_entities("no references here"), "no references here");
    }

    #[test]
    fn decode_handles_named_references() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; &quot;c&quot;"), "a <b> & \"c\"");
    }

    #[test]
    fn decode_handles_numeric_references() {
        assert_eq!(decode_entities("&#35;L42"), "#L42");
        assert_eq!(decode_entities("&#x23;L42"), "#L42");
    }

    #[test]
    fn decode_leaves_unknown_and_bare_ampersands_alone() {
        assert_eq!(decode_entities("a &unknown; b"), "a &unknown; b");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn decode_does_not_scan_past_the_reference_window() {
        let input = "&this-is-way-too-long-to-be-a-reference;x";
        assert_eq!(decode_entities(input), input);
    }

    #[test]
    fn decode_handles_multibyte_text_near_ampersands() {
        assert_eq!(decode_entities("café & crème"), "café & crème");
        assert_eq!(decode_entities("&café;"), "&café;");
        assert_eq!(decode_entities("&amp;é"), "&é");
    }

    #[test]
    fn escape_round_trips_through_decode() {
        let raw = "a <b> & \"c\"";
        let mut escaped = String::new();
        escape_text(raw, &mut escaped);
        assert_eq!(decode_entities(&escaped), raw);
    }
}
