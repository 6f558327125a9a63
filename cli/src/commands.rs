//! Command implementations. Each returns a serializable report that `main`
//! prints as JSON.

use anyhow::{Context, Result};
use gavel_crypto::{
    derive_account, generate_keypair, keypair_from_private, keypair_from_seed, sign_digest, typed_digest,
    DelegationMessage, Domain, PermitMessage,
};
use gavel_ledger::TokenConfig;
use gavel_types::{AccountId, KeyPair, PrivateKey, PublicKey, Timestamp, DECIMALS};
use gavel_utils::{format_units, parse_units};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub public_key: String,
    pub private_key: String,
    pub account: String,
}

#[derive(Debug, Serialize)]
pub struct AccountReport {
    pub public_key: String,
    pub account: String,
}

#[derive(Debug, Serialize)]
pub struct DomainReport {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_ledger: String,
    pub separator: String,
}

#[derive(Debug, Serialize)]
pub struct PermitReport {
    pub owner: String,
    pub owner_key: String,
    pub spender: String,
    pub value: String,
    pub value_raw: u128,
    pub nonce: u64,
    pub deadline: u64,
    pub digest: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct DelegationReport {
    pub delegator: String,
    pub signer_key: String,
    pub delegatee: String,
    pub nonce: u64,
    pub expiry: u64,
    pub digest: String,
    pub signature: String,
}

fn key_report(kp: &KeyPair) -> KeyReport {
    KeyReport {
        public_key: kp.public.to_hex(),
        private_key: hex::encode(kp.private.0),
        account: derive_account(&kp.public).to_string(),
    }
}

/// A fresh key pair, or a deterministic one from a 32-byte hex seed.
pub fn keygen(seed: Option<&str>) -> Result<KeyReport> {
    let kp = match seed {
        Some(hex_seed) => {
            let seed = PrivateKey::from_hex(hex_seed).context("invalid seed")?;
            keypair_from_seed(&seed.0)
        }
        None => generate_keypair(),
    };
    Ok(key_report(&kp))
}

pub fn account(public_key: &str) -> Result<AccountReport> {
    let public = PublicKey::from_hex(public_key).context("invalid public key")?;
    Ok(AccountReport {
        public_key: public.to_hex(),
        account: derive_account(&public).to_string(),
    })
}

/// The signing domain of the ledger deployed at `ledger` under `config`.
pub fn ledger_domain(config: &TokenConfig, ledger: &str) -> Result<Domain> {
    let verifying_ledger = AccountId::from_hex(ledger).context("invalid ledger account")?;
    Ok(Domain {
        name: config.name.clone(),
        version: config.permit_version.clone(),
        chain_id: config.chain_id,
        verifying_ledger,
    })
}

pub fn domain(config: &TokenConfig, ledger: &str) -> Result<DomainReport> {
    let domain = ledger_domain(config, ledger)?;
    let separator = hex::encode(domain.separator());
    Ok(DomainReport {
        name: domain.name,
        version: domain.version,
        chain_id: domain.chain_id,
        verifying_ledger: domain.verifying_ledger.to_string(),
        separator,
    })
}

pub struct PermitArgs<'a> {
    pub private_key: &'a str,
    pub ledger: &'a str,
    pub spender: &'a str,
    pub value: &'a str,
    pub nonce: u64,
    pub deadline: u64,
}

/// Sign a permit offline. `value` is a decimal token amount ("12.5").
pub fn sign_permit(config: &TokenConfig, args: &PermitArgs<'_>) -> Result<PermitReport> {
    let kp = signer(args.private_key)?;
    let domain = ledger_domain(config, args.ledger)?;
    let spender = AccountId::from_hex(args.spender).context("invalid spender")?;
    let value = parse_units(args.value, DECIMALS).context("invalid value")?;

    let message = PermitMessage {
        owner: derive_account(&kp.public),
        spender,
        value,
        nonce: args.nonce,
        deadline: Timestamp::new(args.deadline),
    };
    let digest = typed_digest(&domain, &message.struct_hash());
    let signature = sign_digest(&digest, &kp.private);
    tracing::debug!(owner = %message.owner, %spender, value, nonce = args.nonce, "permit signed");

    Ok(PermitReport {
        owner: message.owner.to_string(),
        owner_key: kp.public.to_hex(),
        spender: spender.to_string(),
        value: format_units(value, DECIMALS),
        value_raw: value,
        nonce: args.nonce,
        deadline: args.deadline,
        digest: hex::encode(digest),
        signature: signature.to_hex(),
    })
}

pub struct DelegationArgs<'a> {
    pub private_key: &'a str,
    pub ledger: &'a str,
    pub delegatee: &'a str,
    pub nonce: u64,
    pub expiry: u64,
}

/// Sign a vote delegation offline. A zero delegatee clears the delegation.
pub fn sign_delegation(config: &TokenConfig, args: &DelegationArgs<'_>) -> Result<DelegationReport> {
    let kp = signer(args.private_key)?;
    let domain = ledger_domain(config, args.ledger)?;
    let delegatee = AccountId::from_hex(args.delegatee).context("invalid delegatee")?;

    let message = DelegationMessage {
        delegatee,
        nonce: args.nonce,
        expiry: Timestamp::new(args.expiry),
    };
    let digest = typed_digest(&domain, &message.struct_hash());
    let signature = sign_digest(&digest, &kp.private);
    let delegator = derive_account(&kp.public);
    tracing::debug!(%delegator, %delegatee, nonce = args.nonce, "delegation signed");

    Ok(DelegationReport {
        delegator: delegator.to_string(),
        signer_key: kp.public.to_hex(),
        delegatee: delegatee.to_string(),
        nonce: args.nonce,
        expiry: args.expiry,
        digest: hex::encode(digest),
        signature: signature.to_hex(),
    })
}

fn signer(private_key: &str) -> Result<KeyPair> {
    let private = PrivateKey::from_hex(private_key).context("invalid private key")?;
    Ok(keypair_from_private(private))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_crypto::verify_digest;
    use gavel_types::{Signature, UNIT};

    const SEED: &str = "0707070707070707070707070707070707070707070707070707070707070707";
    const LEDGER: &str = "1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e";

    fn digest_bytes(hex_digest: &str) -> [u8; 32] {
        let bytes = hex::decode(hex_digest).unwrap();
        bytes.try_into().unwrap()
    }

    #[test]
    fn seeded_keygen_is_deterministic() {
        let a = keygen(Some(SEED)).unwrap();
        let b = keygen(Some(SEED)).unwrap();
        assert_eq!(a.public_key, b.public_key);
        assert_eq!(a.account, b.account);
        assert_eq!(account(&a.public_key).unwrap().account, a.account);
    }

    #[test]
    fn random_keygen_differs() {
        assert_ne!(keygen(None).unwrap().account, keygen(None).unwrap().account);
    }

    #[test]
    fn bad_hex_is_reported() {
        assert!(keygen(Some("zz")).is_err());
        assert!(account("0x1234").is_err());
        assert!(domain(&TokenConfig::default(), "nope").is_err());
    }

    #[test]
    fn domain_uses_config() {
        let config = TokenConfig {
            chain_id: 5,
            ..TokenConfig::default()
        };
        let report = domain(&config, LEDGER).unwrap();
        assert_eq!(report.chain_id, 5);
        assert_eq!(report.name, "Gavel");
        assert_eq!(report.separator.len(), 64);
    }

    #[test]
    fn permit_signature_verifies() {
        let config = TokenConfig::default();
        let report = sign_permit(
            &config,
            &PermitArgs {
                private_key: SEED,
                ledger: LEDGER,
                spender: "0202020202020202020202020202020202020202020202020202020202020202",
                value: "1.5",
                nonce: 0,
                deadline: 2_000_000_000,
            },
        )
        .unwrap();

        assert_eq!(report.value_raw, UNIT + UNIT / 2);
        assert_eq!(report.value, "1.5");
        let key = PublicKey::from_hex(&report.owner_key).unwrap();
        let sig = Signature::from_hex(&report.signature).unwrap();
        assert!(verify_digest(&digest_bytes(&report.digest), &sig, &key));
    }

    #[test]
    fn delegation_signature_verifies() {
        let report = sign_delegation(
            &TokenConfig::default(),
            &DelegationArgs {
                private_key: SEED,
                ledger: LEDGER,
                delegatee: "0909090909090909090909090909090909090909090909090909090909090909",
                nonce: 3,
                expiry: 2_000_000_000,
            },
        )
        .unwrap();
        let key = PublicKey::from_hex(&report.signer_key).unwrap();
        let sig = Signature::from_hex(&report.signature).unwrap();
        assert!(verify_digest(&digest_bytes(&report.digest), &sig, &key));
        assert_eq!(report.delegator, derive_account(&key).to_string());
    }
}
