//! Decoding for the pseudo-serialized list fields posted by the upstream
//! rendering step.
//!
//! The producer emits lists as plain strings, e.g. `["a","b","c"]` for text
//! and `[1,2,3]` for numbers. The splitting rules below are byte-compatible
//! with that producer and must stay that way until the boundary moves to a
//! real structured format. Decoding never fails: malformed input yields an
//! empty sequence, and a numeric list with any unparseable token yields an
//! empty sequence rather than a partial one.

use crate::models::Scalar;

/// Decodes a quote-delimited string list such as `["a","b","c"]`.
///
/// Splits on the three-character separator `","`, then strips the leading
/// `["` from the first element and the trailing `"]` from the last. Empty
/// input and the literal `[]` decode to an empty vec.
pub fn decode_strings(raw: &str) -> Vec<String> {
    if raw.is_empty() || raw == "[]" {
        return Vec::new();
    }

    let mut parts: Vec<String> = raw.split("\",\"").map(str::to_string).collect();
    if let Some(first) = parts.first_mut() {
        *first = first.replace("[\"", "");
    }
    if let Some(last) = parts.last_mut() {
        *last = last.replace("\"]", "");
    }
    parts
}

/// Decodes a numeric list such as `[1,2,3]` or `[7.5,8]`.
///
/// Splits on `,`, strips the brackets from the outer elements, then parses
/// each trimmed token: all-digit tokens become integers, anything else is
/// tried as a float. Any token that parses as neither empties the whole
/// result; partial decodes are never returned.
pub fn decode_numbers(raw: &str) -> Vec<Scalar> {
    if raw.is_empty() || raw == "[]" {
        return Vec::new();
    }

    let mut parts: Vec<String> = raw.split(',').map(str::to_string).collect();
    if let Some(first) = parts.first_mut() {
        *first = first.replace('[', "");
    }
    if let Some(last) = parts.last_mut() {
        *last = last.replace(']', "");
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let token = part.trim();
        let parsed = if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            token.parse::<i64>().ok().map(Scalar::Int)
        } else {
            token.parse::<f64>().ok().map(Scalar::Float)
        };
        match parsed {
            Some(value) => values.push(value),
            None => return Vec::new(),
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strings_empty_inputs() {
        assert_eq!(decode_strings(""), Vec::<String>::new());
        assert_eq!(decode_strings("[]"), Vec::<String>::new());
    }

    #[test]
    fn test_decode_strings_well_formed() {
        assert_eq!(decode_strings(r#"["a","b","c"]"#), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decode_strings_single_element() {
        assert_eq!(decode_strings(r#"["only one"]"#), vec!["only one"]);
    }

    #[test]
    fn test_decode_strings_keeps_embedded_commas() {
        // A bare comma is not the separator; only `","` splits.
        assert_eq!(
            decode_strings(r#"["Crouching Tiger, Hidden Dragon","Hero"]"#),
            vec!["Crouching Tiger, Hidden Dragon", "Hero"]
        );
    }

    #[test]
    fn test_decode_numbers_integers() {
        assert_eq!(
            decode_numbers("[1,2,3]"),
            vec![Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)]
        );
    }

    #[test]
    fn test_decode_numbers_mixed() {
        assert_eq!(
            decode_numbers("[1.5,2]"),
            vec![Scalar::Float(1.5), Scalar::Int(2)]
        );
    }

    #[test]
    fn test_decode_numbers_negative_parses_as_float() {
        // A leading minus fails the all-digits check, so the float path runs.
        assert_eq!(decode_numbers("[-5]"), vec![Scalar::Float(-5.0)]);
    }

    #[test]
    fn test_decode_numbers_whitespace_tokens() {
        assert_eq!(
            decode_numbers("[ 7 , 8 ]"),
            vec![Scalar::Int(7), Scalar::Int(8)]
        );
    }

    #[test]
    fn test_decode_numbers_garbage_is_empty_not_error() {
        assert_eq!(decode_numbers("garbage"), Vec::<Scalar>::new());
    }

    #[test]
    fn test_decode_numbers_one_bad_token_empties_everything() {
        assert_eq!(decode_numbers("[1,x,3]"), Vec::<Scalar>::new());
    }

    #[test]
    fn test_decode_numbers_empty_inputs() {
        assert_eq!(decode_numbers(""), Vec::<Scalar>::new());
        assert_eq!(decode_numbers("[]"), Vec::<Scalar>::new());
    }
}
