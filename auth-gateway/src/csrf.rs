//! One-time form nonces for the password-confirmation sub-flow.
//!
//! A nonce belongs to the session it was issued to and is only accepted
//! back from that session. Each session holds at most one outstanding
//! nonce per namespace; issuing again replaces it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use rand::RngCore;
use std::time::{Duration, Instant};
use tracing::debug;

/// Namespace of the nonce embedded in the confirmation form
pub const CONFIRMATION_NONCE: &str = "OmniaSSO.nonce";

const NONCE_BYTES: usize = 32;

/// Issues session-bound nonces and accepts each one at most once.
pub trait NonceStore: Send + Sync {
    fn issue(&self, namespace: &str, session: &str) -> String;

    /// `true` if `nonce` is the outstanding nonce of `session` in
    /// `namespace` and has not expired. A matching nonce is spent either way.
    fn consume(&self, namespace: &str, session: &str, nonce: &str) -> bool;
}

struct IssuedNonce {
    nonce: String,
    issued_at: Instant,
}

/// Process-local nonce store with a fixed time-to-live.
pub struct InMemoryNonceStore {
    /// Keyed by (session, namespace)
    nonces: DashMap<(String, String), IssuedNonce>,
    ttl: Duration,
}

impl InMemoryNonceStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            nonces: DashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.nonces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nonces.is_empty()
    }

    fn purge_expired(&self) {
        let ttl = self.ttl;
        self.nonces.retain(|_, issued| issued.issued_at.elapsed() < ttl);
    }
}

impl NonceStore for InMemoryNonceStore {
    fn issue(&self, namespace: &str, session: &str) -> String {
        self.purge_expired();

        let mut bytes = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let nonce = URL_SAFE_NO_PAD.encode(bytes);

        self.nonces.insert(
            (session.to_string(), namespace.to_string()),
            IssuedNonce {
                nonce: nonce.clone(),
                issued_at: Instant::now(),
            },
        );
        nonce
    }

    fn consume(&self, namespace: &str, session: &str, nonce: &str) -> bool {
        let key = (session.to_string(), namespace.to_string());
        match self.nonces.remove_if(&key, |_, issued| issued.nonce == nonce) {
            Some((_, issued)) if issued.issued_at.elapsed() >= self.ttl => {
                debug!(namespace, "Nonce expired");
                false
            }
            Some(_) => true,
            None => {
                debug!(namespace, "Nonce does not match the session's outstanding nonce");
                false
            }
        }
    }
}
