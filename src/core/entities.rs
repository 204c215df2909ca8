//! XML entity decoding
//!
//! Handles the five built-in entities (&lt; &gt; &amp; &quot; &apos;)
//! and numeric character references (&#123; &#x7B;).
//!
//! Uses Cow for zero-copy when no references are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode entity references in a text run or attribute value.
///
/// Returns Borrowed if no references are present (zero-copy). Undefined
/// entities and malformed character references are errors; the tokenizer
/// attaches the position.
pub fn decode(input: &str) -> Result<Cow<'_, str>, String> {
    // Fast path: no ampersand, nothing to decode
    if memchr(b'&', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match memchr(b'&', &bytes[pos..]) {
            Some(amp) => {
                out.push_str(&input[pos..pos + amp]);
                let ref_start = pos + amp;

                let semi = match memchr(b';', &bytes[ref_start..]) {
                    Some(semi) => semi,
                    None => return Err("unterminated entity reference".to_string()),
                };
                let name = &input[ref_start + 1..ref_start + semi];
                out.push(decode_reference(name)?);
                pos = ref_start + semi + 1;
            }
            None => {
                out.push_str(&input[pos..]);
                break;
            }
        }
    }

    Ok(Cow::Owned(out))
}

/// Decode a single reference body (the part between `&` and `;`).
fn decode_reference(name: &str) -> Result<char, String> {
    match name {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ if name.starts_with('#') => {
            let (digits, radix) = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                Some(hex) => (hex, 16),
                None => (&name[1..], 10),
            };
            u32::from_str_radix(digits, radix)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("invalid character reference &{name};"))
        }
        _ => Err(format!("undefined entity &{name};")),
    }
}
