use chrono::Utc;
use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256};

/// Wall-clock time of day in UTC, `HH:MM:SS`. Informational only.
pub fn current_timestamp() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 of `data` as 64 lowercase hex characters.
pub fn hex_digest(data: &[u8]) -> String {
    HEXLOWER.encode(sha256_digest(data).as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_length() {
        assert_eq!(sha256_digest(b"").len(), 32);
        assert_eq!(hex_digest(b"").len(), 64);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = current_timestamp();
        assert_eq!(ts.len(), 8);
        let parts: Vec<&str> = ts.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }
}
