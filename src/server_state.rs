/*!
The server's view of the world: a table of registered users, each one
guarded by its own mutex so unrelated users' calls never serialize
against each other, with an outer mutex only protecting the table
itself (insertion of brand-new users).
*/
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::big_number::BigNumber;
use crate::group_math;
use crate::primitives::{ServerUser, Vault};
use crate::{OnlineSphinxError, Result};

#[derive(Debug, Default)]
pub struct ServerState {
    users: RwLock<HashMap<String, Mutex<ServerUser>>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// registers a brand-new cID, minting a fresh random verifier `kv`
    /// of the configured bit length; refuses to overwrite an existing
    /// registration
    pub fn register(&self, c_id: &BigNumber, bit_length: u64) -> Result<()> {
        let key = c_id_key(c_id);
        let mut table = self.users.write().expect("server state lock poisoned");
        if table.contains_key(&key) {
            return Err(OnlineSphinxError::AlreadyRegistered);
        }
        let kv = BigNumber::new_rand_bits(bit_length);
        log::debug!("registered cID={} kv={}", c_id, kv);
        table.insert(
            key,
            Mutex::new(ServerUser {
                c_id: c_id.clone(),
                kv,
                vaults: Vec::new(),
            }),
        );
        Ok(())
    }

    /// looks up the stored verifier `kv` for a given cID
    pub fn get(&self, c_id: &BigNumber) -> Result<BigNumber> {
        let key = c_id_key(c_id);
        let table = self.users.read().expect("server state lock poisoned");
        let entry = table.get(&key).ok_or(OnlineSphinxError::NotFound)?;
        let user = entry.lock().expect("per-user lock poisoned");
        Ok(user.kv.clone())
    }

    /// mints a fresh per-domain secret `qj` and stores it, last-write-wins
    /// on duplicate domains
    pub fn add_vault(&self, c_id: &BigNumber, domain: &str, bit_length: u64) -> Result<()> {
        let key = c_id_key(c_id);
        let table = self.users.read().expect("server state lock poisoned");
        let entry = table.get(&key).ok_or(OnlineSphinxError::NotFound)?;
        let mut user = entry.lock().expect("per-user lock poisoned");
        let secret = BigNumber::new_rand_bits(bit_length);
        if let Some(v) = user.vaults.iter_mut().find(|v| v.domain == domain) {
            v.secret = secret;
        } else {
            user.vaults.push(Vault {
                domain: domain.to_owned(),
                secret,
            });
        }
        log::debug!("added vault domain={} for cID={}", domain, c_id);
        Ok(())
    }

    /// derives `bj = bmk^qj mod p` for the stored per-domain secret,
    /// returning it together with `qj` itself
    pub fn get_vault(&self, c_id: &BigNumber, domain: &str, bmk: &BigNumber, q: &BigNumber) -> Result<(BigNumber, BigNumber)> {
        let key = c_id_key(c_id);
        let table = self.users.read().expect("server state lock poisoned");
        let entry = table.get(&key).ok_or(OnlineSphinxError::NotFound)?;
        let user = entry.lock().expect("per-user lock poisoned");
        let vault = user
            .vaults
            .iter()
            .find(|v| v.domain == domain)
            .ok_or(OnlineSphinxError::DomainNotFound)?;
        let bj = group_math::exp_in_group(bmk, &vault.secret, q);
        Ok((bj, vault.secret.clone()))
    }

    /// every domain registered for a cID, lexicographically ordered
    pub fn domains(&self, c_id: &BigNumber) -> Result<Vec<String>> {
        let key = c_id_key(c_id);
        let table = self.users.read().expect("server state lock poisoned");
        let entry = table.get(&key).ok_or(OnlineSphinxError::NotFound)?;
        let user = entry.lock().expect("per-user lock poisoned");
        let mut domains: Vec<String> = user.vaults.iter().map(|v| v.domain.clone()).collect();
        domains.sort();
        Ok(domains)
    }
}

fn c_id_key(c_id: &BigNumber) -> String {
    c_id.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_double_registration() {
        let state = ServerState::new();
        let c_id = BigNumber::from(7u32);
        state.register(&c_id, 64).unwrap();
        let err = state.register(&c_id, 64).unwrap_err();
        assert_eq!(err, OnlineSphinxError::AlreadyRegistered);
    }

    #[test]
    fn should_not_find_unregistered_user() {
        let state = ServerState::new();
        let err = state.get(&BigNumber::from(1u32)).unwrap_err();
        assert_eq!(err, OnlineSphinxError::NotFound);
    }

    #[test]
    fn should_list_domains_lexicographically() {
        let state = ServerState::new();
        let c_id = BigNumber::from(7u32);
        state.register(&c_id, 64).unwrap();
        state.add_vault(&c_id, "zeta.example", 64).unwrap();
        state.add_vault(&c_id, "alpha.example", 64).unwrap();
        let domains = state.domains(&c_id).unwrap();
        assert_eq!(domains, vec!["alpha.example", "zeta.example"]);
    }

    #[test]
    fn should_reject_get_vault_for_unknown_domain() {
        let state = ServerState::new();
        let c_id = BigNumber::from(7u32);
        state.register(&c_id, 64).unwrap();
        let q = BigNumber::from(23u32);
        let err = state
            .get_vault(&c_id, "nope.example", &BigNumber::from(3u32), &q)
            .unwrap_err();
        assert_eq!(err, OnlineSphinxError::DomainNotFound);
    }

    #[test]
    fn should_derive_bj_from_stored_secret() {
        let state = ServerState::new();
        let c_id = BigNumber::from(7u32);
        state.register(&c_id, 64).unwrap();
        state.add_vault(&c_id, "example.com", 32).unwrap();
        let q = BigNumber::from(23u32);
        let bmk = BigNumber::from(5u32);
        let (bj, qj) = state.get_vault(&c_id, "example.com", &bmk, &q).unwrap();
        assert_eq!(bj, group_math::exp_in_group(&bmk, &qj, &q));
    }
}
