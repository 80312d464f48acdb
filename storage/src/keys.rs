//! Composite keys.
//!
//! A key is the concatenation of its parts. Integers are written as 8 little endian bytes and
//! raw bytes verbatim; strings are followed by a NUL byte so that a string part can never be
//! mistaken for the prefix of a longer one during prefix scans.

/// Anything that can be appended to a composite key
pub trait KeyPart {
    /// Append the encoding of `self` to `key`.
    fn append_to(&self, key: &mut Vec<u8>);
}

impl KeyPart for str {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(self.as_bytes());
        key.push(0x00);
    }
}

impl KeyPart for String {
    fn append_to(&self, key: &mut Vec<u8>) {
        self.as_str().append_to(key)
    }
}

impl KeyPart for [u8] {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(self);
    }
}

impl KeyPart for Vec<u8> {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(self);
    }
}

impl<const N: usize> KeyPart for [u8; N] {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(self);
    }
}

impl KeyPart for u64 {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(&self.to_le_bytes());
    }
}

impl KeyPart for i64 {
    fn append_to(&self, key: &mut Vec<u8>) {
        key.extend_from_slice(&self.to_le_bytes());
    }
}

impl KeyPart for u32 {
    fn append_to(&self, key: &mut Vec<u8>) {
        u64::from(*self).append_to(key)
    }
}

impl<T: KeyPart + ?Sized> KeyPart for &T {
    fn append_to(&self, key: &mut Vec<u8>) {
        (**self).append_to(key)
    }
}

/// Build a composite key out of its parts.
///
/// ```
/// use mona_storage::keys::to_key;
///
/// let key = to_key(&[&"block" as &dyn mona_storage::keys::KeyPart, &7u64]);
/// assert_eq!(key, b"block\0\x07\0\0\0\0\0\0\0".to_vec());
/// ```
pub fn to_key(parts: &[&dyn KeyPart]) -> Vec<u8> {
    let mut key = vec![];
    for part in parts {
        part.append_to(&mut key);
    }

    key
}

/// Build a composite key from a list of heterogeneous parts.
#[macro_export]
macro_rules! key {
    ($($part:expr),* $(,)?) => {
        $crate::keys::to_key(&[$(&$part as &dyn $crate::keys::KeyPart),*])
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_string_parts_are_nul_terminated() {
        assert_eq!(key!("ab", "c"), b"ab\0c\0".to_vec());
    }

    #[test]
    fn test_integers_are_little_endian() {
        assert_eq!(key!(1u64), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(key!(-1i64), vec![0xff; 8]);
        assert_eq!(key!(0x0102u32), vec![2, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_bytes_are_verbatim() {
        let hash = [0xaau8; 4];

        assert_eq!(key!(hash, 3u64), vec![0xaa, 0xaa, 0xaa, 0xaa, 3, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_string_prefix_cannot_match_longer_string() {
        let short = key!("coin");
        let long = key!("coins");

        assert!(!long.starts_with(&short));
    }
}
