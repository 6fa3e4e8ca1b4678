//! Record identifier generation
//!
//! Stored records use ids of the form `<prefix>_<unix_ms>_<suffix>`: the
//! creation instant in milliseconds plus a 9-character base36 suffix.
//! Ids are globally unique across all record kinds because each kind
//! carries its own prefix and the suffix space is large enough that a
//! same-millisecond collision is not a practical concern.

use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh record id for the given prefix, e.g. `alert`, `user`.
pub fn record_id(prefix: &str) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        random_suffix()
    )
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // unwrap is acceptable in tests
mod tests {
    use super::*;

    #[test]
    fn test_id_layout() {
        let id = record_id("alert");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "alert");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = record_id("notification");
        let b = record_id("notification");
        assert_ne!(a, b);
    }
}
