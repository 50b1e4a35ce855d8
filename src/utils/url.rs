/// Percent-encoding compatible con `encodeURIComponent` para armar
/// query strings y cuerpos form-encoded.
pub fn url_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(*byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(*byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Cuerpo `application/x-www-form-urlencoded` a partir de pares clave/valor.
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(url_encode("ana maría"), "ana%20mar%C3%ADa");
        assert_eq!(url_encode("a+b=c&d"), "a%2Bb%3Dc%26d");
        assert_eq!(url_encode("safe-chars_.~"), "safe-chars_.~");
    }

    #[test]
    fn form_encode_joins_pairs() {
        assert_eq!(
            form_encode(&[("email", "a@b.io"), ("password", "p&w")]),
            "email=a%40b.io&password=p%26w"
        );
    }
}
