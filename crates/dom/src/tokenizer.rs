//! Simplified HTML tokenizer with a constrained, practical tag-name character set.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased on
//! emission. This is not a spec HTML5 state machine: there is no parse-error
//! recovery beyond skipping malformed input, which is enough for the
//! well-formed page markup this crate consumes.
//!
//! Known limitations (intentional):
//! - No character-reference decoding inside rawtext (`script`/`style`) bodies.
//! - Rawtext close tags accept only ASCII whitespace before `>`.

use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Find the first `</name … >` close tag in `haystack`, case-insensitively.
/// Returns the byte range of the whole close tag.
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        i += rel;
        let tag_start = i + 2;
        let tag_end = tag_start + name.len();
        if bytes.get(i + 1) == Some(&b'/')
            && bytes.len() >= tag_end
            && bytes[tag_start..tag_end].eq_ignore_ascii_case(name.as_bytes())
        {
            let mut k = tag_end;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Tokenize `input` into a flat token list. Never fails; unparseable bytes
/// are skipped. Slice endpoints only ever land on ASCII structural bytes,
/// so UTF-8 boundaries are preserved throughout.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            let decoded = decode_entities(&input[i..end]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            i = end;
            continue;
        }

        if input[i..].starts_with(COMMENT_OPEN) {
            let body_start = i + COMMENT_OPEN.len();
            match input[body_start..].find(COMMENT_CLOSE) {
                Some(rel) => {
                    out.push(Token::Comment(input[body_start..body_start + rel].to_string()));
                    i = body_start + rel + COMMENT_CLOSE.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = bytes.len();
                }
            }
            continue;
        }

        if bytes[i..].len() >= 2 && bytes[i + 1] == b'!' {
            // <!doctype …> or any other declaration: take through '>'.
            let rest = &input[i + 2..];
            let Some(rel) = rest.find('>') else { break };
            let body = rest[..rel].trim();
            if body.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("doctype")) {
                out.push(Token::Doctype(body[7..].trim().to_string()));
            }
            i += 2 + rel + 1;
            continue;
        }

        if bytes[i..].len() >= 2 && bytes[i + 1] == b'/' {
            let name_start = i + 2;
            let mut j = name_start;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[name_start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            i = (j + 1).min(bytes.len());
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            continue;
        }

        // Start tag; a '<' not followed by a name byte is literal text.
        let name_start = i + 1;
        let mut j = name_start;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == name_start {
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[name_start..j].to_ascii_lowercase();

        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;
        loop {
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= bytes.len() {
                break;
            }
            if bytes[j] == b'>' {
                j += 1;
                break;
            }
            if bytes[j] == b'/' {
                if bytes.get(j + 1) == Some(&b'>') {
                    self_closing = true;
                    j += 2;
                    break;
                }
                j += 1;
                continue;
            }

            let attr_start = j;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            if j == attr_start {
                j += 1;
                continue;
            }
            let attr_name = input[attr_start..j].to_ascii_lowercase();

            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            let value = if bytes.get(j) == Some(&b'=') {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if matches!(bytes.get(j), Some(b'"') | Some(b'\'')) {
                    let quote = bytes[j];
                    j += 1;
                    let value_start = j;
                    while j < bytes.len() && bytes[j] != quote {
                        j += 1;
                    }
                    let raw = &input[value_start..j];
                    if j < bytes.len() {
                        j += 1;
                    }
                    Some(decode_entities(raw))
                } else {
                    let value_start = j;
                    while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                        j += 1;
                    }
                    Some(input[value_start..j].to_string())
                }
            } else {
                None
            };
            attributes.push((attr_name, value));
        }

        let self_closing = self_closing || is_void_element(&name);
        let rawtext = !self_closing && (name == "script" || name == "style");
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        i = j;

        if rawtext {
            match find_rawtext_close(&input[i..], &name) {
                Some((rel_start, rel_end)) => {
                    if rel_start > 0 {
                        out.push(Token::Text(input[i..i + rel_start].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i += rel_end;
                }
                None => {
                    // Missing close tag: the remainder is rawtext content.
                    if i < bytes.len() {
                        out.push(Token::Text(input[i..].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = bytes.len();
                }
            }
        }
    }

    log::trace!(target: "dom.tokenizer", "tokenized {} bytes into {} tokens", input.len(), out.len());
    out
}
