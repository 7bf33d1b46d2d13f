//! Content hashing for published dashboards.
//!
//! This module provides:
//! - `ObjectHash`: a truncated 20-character hash identifying serialized content
//! - `Hashable`: a blanket hashing scheme for any serializable value
//! - `hash_bytes()`: arbitrary byte hashing

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::OBJ_HASH_PREFIX_LEN;

pub type HashError = serde_json::Error;

/// A content-addressed hash identifying a unique object.
///
/// The hash is a 20-character truncated SHA-256 of the JSON-serialized value.
/// Two values hash equal exactly when their serializations are byte-identical,
/// which is what the assembly determinism guarantees are stated in terms of.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string, e.g., `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let full = hash_bytes(serialized.as_bytes());
    Ok(ObjectHash(full[..OBJ_HASH_PREFIX_LEN].to_string()))
  }
}

/// Compute the full 64-character SHA-256 of a byte slice.
pub fn hash_bytes(bytes: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(bytes);
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Sample {
    name: String,
    width: u32,
  }

  impl Hashable for Sample {}

  #[test]
  fn hash_is_truncated() {
    let sample = Sample {
      name: "Lambda - Errors".to_string(),
      width: 6,
    };
    let hash = sample.compute_hash().unwrap();
    assert_eq!(hash.0.len(), OBJ_HASH_PREFIX_LEN);
  }

  #[test]
  fn hash_is_deterministic() {
    let a = Sample {
      name: "x".to_string(),
      width: 6,
    };
    let b = Sample {
      name: "x".to_string(),
      width: 6,
    };
    assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
  }

  #[test]
  fn hash_changes_with_content() {
    let a = Sample {
      name: "x".to_string(),
      width: 6,
    };
    let b = Sample {
      name: "x".to_string(),
      width: 8,
    };
    assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
  }

  #[test]
  fn hash_bytes_known_value() {
    assert_eq!(
      hash_bytes(b""),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
  }
}
