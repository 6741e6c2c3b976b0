//! Storage keys derived from instance names.
//!
//! Names are never stored as map keys directly. Every name goes through a fixed
//! SHA-256 digest first, and the 32-byte result is what the registry indexes by.
//! Two names with the same digest therefore share one slot.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of an instance name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key([u8; 32]);

impl Key {
    /// Digest the UTF-8 bytes of `name`.
    pub fn of(name: &str) -> Self {
        Key(Sha256::digest(name.as_bytes()).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Key::of("abc").to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_name_digest() {
        assert_eq!(
            Key::of("").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(Key::of("svc"), Key::of("svc"));
        assert_ne!(Key::of("svc"), Key::of("svc "));
    }

    #[test]
    fn test_utf8_names() {
        let key = Key::of("héllo");
        assert_eq!(key, Key::of("h\u{e9}llo"));
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_debug_format() {
        let key = Key::of("abc");
        assert_eq!(
            format!("{:?}", key),
            "Key(ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad)"
        );
    }
}
