use rebate_types::{Checksum, RecipientAllocation};
use sha2::{Digest, Sha256};

/// Hash reference (hex-encoded SHA256)
pub type HashRef = String;

/// Compute SHA256 hash of data
pub fn compute_hash(data: &[u8]) -> HashRef {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Compute hash of JSON-serialized data
pub fn compute_json_hash<T: serde::Serialize>(data: &T) -> Result<HashRef, serde_json::Error> {
    let json = serde_json::to_vec(data)?;
    Ok(compute_hash(&json))
}

/// Digest of an ordered allocation list, `0x`-prefixed
///
/// Order matters: the same entries in a different order hash differently.
pub fn allocation_checksum(entries: &[RecipientAllocation]) -> Result<Checksum, serde_json::Error> {
    let hash = compute_json_hash(&entries)?;
    Ok(Checksum::new(format!("0x{}", hash)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebate_types::Amount;

    #[test]
    fn test_compute_hash() {
        let data = b"hello world";
        let hash = compute_hash(data);
        assert_eq!(hash.len(), 64); // SHA256 hex is 64 chars
    }

    #[test]
    fn test_deterministic() {
        let data = b"test";
        let hash1 = compute_hash(data);
        let hash2 = compute_hash(data);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_allocation_checksum_is_order_sensitive() {
        let a = RecipientAllocation::new("alice", Amount::from_units(1));
        let b = RecipientAllocation::new("bob", Amount::from_units(2));

        let forward = allocation_checksum(&[a.clone(), b.clone()]).unwrap();
        let reverse = allocation_checksum(&[b, a]).unwrap();

        assert!(forward.as_str().starts_with("0x"));
        assert_eq!(forward.as_str().len(), 66);
        assert_ne!(forward, reverse);
    }

    #[test]
    fn test_empty_allocation_checksum() {
        // "[]"
        let expected = format!("0x{}", compute_hash(b"[]"));
        assert_eq!(allocation_checksum(&[]).unwrap().as_str(), expected);
    }
}
