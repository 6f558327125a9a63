//! Ed25519 signing and verification of 32-byte digests.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use gavel_types::{PrivateKey, PublicKey, Signature};

/// Sign a digest with a private key.
pub fn sign_digest(digest: &[u8; 32], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(digest).to_bytes())
}

/// Verify a signature over `digest` against `public_key`.
///
/// Returns `false` for malformed public keys as well as bad signatures.
pub fn verify_digest(digest: &[u8; 32], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify_strict(digest, &dalek_sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let digest = [9u8; 32];
        let sig = sign_digest(&digest, &kp.private);
        assert!(verify_digest(&digest, &sig, &kp.public));
    }

    #[test]
    fn wrong_digest_fails() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let sig = sign_digest(&[1u8; 32], &kp.private);
        assert!(!verify_digest(&[2u8; 32], &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        let sig = sign_digest(&[7u8; 32], &kp1.private);
        assert!(!verify_digest(&[7u8; 32], &sig, &kp2.public));
    }

    #[test]
    fn invalid_public_key() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sig = sign_digest(&[7u8; 32], &kp.private);
        assert!(!verify_digest(&[7u8; 32], &sig, &PublicKey([0xFF; 32])));
    }
}
