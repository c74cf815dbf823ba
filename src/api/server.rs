/*!
Server-side half of the protocol state machine: `ServerState` for
durable per-user records, `SessionBinding` for the volatile
connection-token → {cID, sID, ski} map established once a Login
completes.
*/
use subtle::ConstantTimeEq;

use crate::big_number::BigNumber;
use crate::group_math;
use crate::primitives::{
    AddRequest, ChallengeRequest, ChallengeResponse, ExpKRequest, ExpKResponse, GetRequest,
    GetResponse, MetadataRequest, MetadataResponse, RegisterRequest, ServerConfig,
};
use crate::server_state::ServerState;
use crate::session::SessionBinding;
use crate::{OnlineSphinxError, Result};

/// the two-party state machine's server half
pub struct Server {
    pub config: ServerConfig,
    pub state: ServerState,
    pub sessions: SessionBinding,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: ServerState::new(),
            sessions: SessionBinding::new(),
        }
    }

    pub fn register(&self, req: &RegisterRequest) -> Result<()> {
        self.state.register(&req.c_id, self.config.bit_length)
    }

    /// the ExpK step of Login: exponentiates the client's blinded value
    /// by the server's own secret multiplier, and binds a session under
    /// `token` using the freshly-derived `ski`
    pub fn exp_k(&self, token: &str, req: &ExpKRequest) -> Result<ExpKResponse> {
        let bd = group_math::exp_in_group(&req.b, &self.config.k, &req.q);
        let s_nonce = BigNumber::new_rand_below(&req.q);
        let kv = self.state.get(&req.c_id)?;

        let ski = self.config.hash.hmac(
            &kv.to_bytes_be(),
            &[
                &req.c_id.to_bytes_be(),
                &self.config.s_id.to_bytes_be(),
                &req.c_nonce.to_bytes_be(),
                &s_nonce.to_bytes_be(),
            ],
        );
        self.sessions.bind(token, req.c_id.clone(), self.config.s_id.clone(), ski);
        log::debug!("exp_k cID={} bd={}", req.c_id, bd);

        Ok(ExpKResponse {
            s_id: self.config.s_id.clone(),
            s_nonce,
            bd,
            q0: self.config.q0.clone(),
            kv,
        })
    }

    pub fn challenge(&self, token: &str, req: &ChallengeRequest) -> Result<ChallengeResponse> {
        let session = self.sessions.lookup(token)?;
        let ski = BigNumber::from_bytes_be(&session.ski);
        let r = group_math::exp_in_group(&req.g, &ski, &req.q);
        Ok(ChallengeResponse { r })
    }

    pub fn get_metadata(&self, token: &str, req: &MetadataRequest) -> Result<MetadataResponse> {
        let session = self.sessions.lookup(token)?;
        let expected = self.config.hash.hmac(&session.ski, &[b"metadata"]);
        if !macs_equal(&req.mac, &expected) {
            return Err(OnlineSphinxError::MacMismatch);
        }
        let domains = self.state.domains(&session.c_id)?;
        Ok(MetadataResponse { domains })
    }

    pub fn add_vault(&self, token: &str, req: &AddRequest) -> Result<()> {
        let session = self.sessions.lookup(token)?;
        let expected = self.config.hash.hmac(&session.ski, &[req.domain.as_bytes()]);
        if !macs_equal(&req.mac, &expected) {
            return Err(OnlineSphinxError::MacMismatch);
        }
        self.state
            .add_vault(&session.c_id, &req.domain, self.config.bit_length)
    }

    pub fn get_vault(&self, token: &str, req: &GetRequest) -> Result<GetResponse> {
        let session = self.sessions.lookup(token)?;
        let expected = self
            .config
            .hash
            .hmac(&session.ski, &[req.bmk.to_bytes_be().as_slice()]);
        if !macs_equal(&req.mac, &expected) {
            return Err(OnlineSphinxError::MacMismatch);
        }
        let (bj, qj) = self
            .state
            .get_vault(&session.c_id, &req.domain, &req.bmk, &req.q)?;
        Ok(GetResponse { bj, qj })
    }

    pub fn logout(&self, token: &str) {
        self.sessions.destroy(token);
    }
}

fn macs_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
