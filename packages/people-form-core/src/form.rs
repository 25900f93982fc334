//! Form-urlencoded submission parsing.

use percent_encoding::percent_decode;

/// Parses an `application/x-www-form-urlencoded` body into ordered
/// key/value pairs.
///
/// Pair order is preserved so the codec's last-write-wins rule sees the
/// submission as the browser sent it. `+` decodes to a space, percent
/// escapes decode lossily to UTF-8, and a segment without `=` becomes a
/// pair with an empty value.
pub fn parse_form_urlencoded(body: &[u8]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for segment in body.split(|&b| b == b'&') {
        if segment.is_empty() {
            continue;
        }
        match segment.iter().position(|&b| b == b'=') {
            Some(eq) => pairs.push((
                decode_component(&segment[..eq]),
                decode_component(&segment[eq + 1..]),
            )),
            None => pairs.push((decode_component(segment), String::new())),
        }
    }

    pairs
}

fn decode_component(raw: &[u8]) -> String {
    let unplussed: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&unplussed).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_pairs_in_order() {
        let pairs = parse_form_urlencoded(b"first_name=Akshay&last_name=Donga");
        assert_eq!(
            pairs,
            vec![
                ("first_name".to_string(), "Akshay".to_string()),
                ("last_name".to_string(), "Donga".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let pairs = parse_form_urlencoded(b"addresses%5B0%5D.street=Main+St&emails%5B0%5D.email=a%40x.com");
        assert_eq!(
            pairs,
            vec![
                ("addresses[0].street".to_string(), "Main St".to_string()),
                ("emails[0].email".to_string(), "a@x.com".to_string()),
            ]
        );
    }

    #[test]
    fn valueless_keys_become_empty_values() {
        let pairs = parse_form_urlencoded(b"landmark&city=NY");
        assert_eq!(
            pairs,
            vec![
                ("landmark".to_string(), String::new()),
                ("city".to_string(), "NY".to_string()),
            ]
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        let pairs = parse_form_urlencoded(b"&a=1&&b=2&");
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn equals_in_value_is_kept() {
        let pairs = parse_form_urlencoded(b"note=a=b");
        assert_eq!(pairs, vec![("note".to_string(), "a=b".to_string())]);
    }
}
