/*!
This module defines the entities and wire messages of the protocol, as
plain structs so that every field's meaning is expressed by its type
rather than by convention.

The cryptographic values (`q`, `k`, `cID`, `mk`, ...) are all
[`BigNumber`]s; MACs are raw byte vectors; domains and usernames are
plain [`String`]s.
*/
use serde::{Deserialize, Serialize};

use crate::big_number::BigNumber;
use crate::hash::HashAlgorithm;

/// a username together with the master password the client holds
/// in memory only for the duration of one call
#[derive(Debug, Clone)]
pub struct UserCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// what the client persists locally after `Register`, keyed by username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUser {
    pub username: String,
    /// cID: the client's per-user identifier, bound at registration
    pub c_id: BigNumber,
    /// q: the per-user group order, chosen by the client at Register time
    pub q: BigNumber,
    /// k: the client's long-term secret multiplier for this user
    pub k: BigNumber,
}

/// what the server persists, keyed by cID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerUser {
    pub c_id: BigNumber,
    /// kv: the verifier the server stores for this user
    pub kv: BigNumber,
    pub vaults: Vec<Vault>,
}

/// one stored per-domain vault entry; `secret` (qj) is a fresh random
/// exponent minted at AddVault time, used to re-derive that domain's
/// password at every subsequent GetVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    pub domain: String,
    pub secret: BigNumber,
}

/// the volatile binding produced after a successful Login/Challenge,
/// scoped to one connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub c_id: BigNumber,
    pub s_id: BigNumber,
    pub ski: Vec<u8>,
}

/// the protocol's configuration knobs (spec §6.3)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// sID: the server's own identifier, constant across all sessions
    pub s_id: BigNumber,
    /// the server's long-term secret multiplier
    pub k: BigNumber,
    /// q0: the server's fixed group order used for the final masking step
    pub q0: BigNumber,
    pub hash: HashAlgorithm,
    pub bit_length: u64,
}

// ---- wire messages (spec §4.5 / §6.1) ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub c_id: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpKRequest {
    pub c_id: BigNumber,
    pub c_nonce: BigNumber,
    pub b: BigNumber,
    pub q: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpKResponse {
    pub s_id: BigNumber,
    pub s_nonce: BigNumber,
    pub bd: BigNumber,
    pub q0: BigNumber,
    pub kv: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub g: BigNumber,
    pub q: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub r: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRequest {
    pub mac: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    pub domain: String,
    pub mac: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRequest {
    pub domain: String,
    pub mac: Vec<u8>,
    pub bmk: BigNumber,
    pub q: BigNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    pub bj: BigNumber,
    pub qj: BigNumber,
}

/// the wire-level rendering of any [`crate::OnlineSphinxError`]; the
/// transport maps its category to a status code (spec §7), this struct
/// only carries the human-readable text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
