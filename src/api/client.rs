/*!
Client-side half of the protocol state machine. Ephemeral blinding
factors live only as long as one call: `start_login`/`finish_login` and
`start_get_vault`/`finish_get_vault` each carry their secret across the
round trip the way the teacher's `Srp6User` carries `a` between
`start_handshake` and `update_handshake`.
*/
use crate::big_number::BigNumber;
use crate::client_state::ClientState;
use crate::group_math;
use crate::hash::HashAlgorithm;
use crate::primitives::{
    AddRequest, ChallengeRequest, ChallengeResponse, ClientUser, ExpKRequest, ExpKResponse,
    GetRequest, GetResponse, MetadataRequest, MetadataResponse, RegisterRequest,
};
use crate::{OnlineSphinxError, Result};

#[derive(Debug, Clone)]
struct ClientSession {
    c_id: BigNumber,
    q: BigNumber,
    k: BigNumber,
    ski: Vec<u8>,
    mk: BigNumber,
}

struct PendingLogin {
    username: String,
    kinv: BigNumber,
    c_nonce: BigNumber,
}

struct PendingGet {
    kinv: BigNumber,
}

/// client-side half of the protocol state machine
#[derive(Default)]
pub struct Client {
    pub state: ClientState,
    session: Option<ClientSession>,
    pending_login: Option<PendingLogin>,
    pending_get: Option<PendingGet>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// creates a brand-new local user and the RegisterRequest to send
    pub fn register(&mut self, username: &str, bit_length: u64) -> RegisterRequest {
        let q = group_math::gen_prime(bit_length);
        let c_id = BigNumber::new_rand_bits(bit_length);
        let k = BigNumber::new_rand_below(&q);
        log::debug!("register username={} cID={} q={}", username, c_id, q);
        self.state.insert(ClientUser {
            username: username.to_owned(),
            c_id: c_id.clone(),
            q,
            k,
        });
        RegisterRequest { c_id }
    }

    /// starts a Login: blinds the password and produces the ExpKRequest
    pub fn start_login(&mut self, hash: &HashAlgorithm, username: &str, password: &str) -> Result<ExpKRequest> {
        let user = self.state.get(username)?.clone();
        let g = group_math::hash_password_in_group(hash, password, &user.q);
        let c_nonce = BigNumber::new_rand_below(&user.q);
        let (k, kinv) = group_math::blind(&user.q);
        let b = group_math::exp_in_group(&g, &k, &user.q);
        log::debug!("start_login cID={} b={}", user.c_id, b);

        self.pending_login = Some(PendingLogin {
            username: username.to_owned(),
            kinv,
            c_nonce: c_nonce.clone(),
        });

        Ok(ExpKRequest {
            c_id: user.c_id,
            c_nonce,
            b,
            q: user.q,
        })
    }

    /// completes a Login from the server's ExpKResponse, establishing
    /// the session key and master key
    pub fn finish_login(&mut self, hash: &HashAlgorithm, response: &ExpKResponse) -> Result<()> {
        let pending = self
            .pending_login
            .take()
            .ok_or(OnlineSphinxError::LoginRequired)?;
        let user = self.state.get(&pending.username)?.clone();

        let b0 = group_math::unblind(&response.bd, &pending.kinv, &user.q);
        let ski = hash.hmac(
            &response.kv.to_bytes_be(),
            &[
                &user.c_id.to_bytes_be(),
                &response.s_id.to_bytes_be(),
                &pending.c_nonce.to_bytes_be(),
                &response.s_nonce.to_bytes_be(),
            ],
        );
        let mk = group_math::exp_in_group(&b0, &user.k, &user.q) * response.q0.clone();
        log::debug!("finish_login cID={} ski={:x?}", user.c_id, ski);

        self.session = Some(ClientSession {
            c_id: user.c_id,
            q: user.q,
            k: user.k,
            ski,
            mk,
        });
        Ok(())
    }

    /// produces a Challenge request proving knowledge of `ski`, and the
    /// locally-expected response to compare against what the server sends back
    pub fn start_challenge(&self) -> Result<(ChallengeRequest, ChallengeResponse)> {
        let session = self.session.as_ref().ok_or(OnlineSphinxError::LoginRequired)?;
        let g = BigNumber::new_rand_below(&session.q);
        let ski = BigNumber::from_bytes_be(&session.ski);
        let expected = group_math::exp_in_group(&g, &ski, &session.q);
        Ok((
            ChallengeRequest {
                g,
                q: session.q.clone(),
            },
            ChallengeResponse { r: expected },
        ))
    }

    /// verifies the server's Challenge response against the locally
    /// precomputed expectation
    pub fn verify_challenge(expected: &ChallengeResponse, response: &ChallengeResponse) -> Result<()> {
        if expected.r == response.r {
            Ok(())
        } else {
            Err(OnlineSphinxError::AuthenticationFailed)
        }
    }

    pub fn metadata_request(&self, hash: &HashAlgorithm) -> Result<MetadataRequest> {
        let session = self.session.as_ref().ok_or(OnlineSphinxError::LoginRequired)?;
        let mac = hash.hmac(&session.ski, &[b"metadata"]);
        Ok(MetadataRequest { mac })
    }

    pub fn read_metadata(response: MetadataResponse) -> Vec<String> {
        response.domains
    }

    pub fn add_vault_request(&self, hash: &HashAlgorithm, domain: &str) -> Result<AddRequest> {
        let session = self.session.as_ref().ok_or(OnlineSphinxError::LoginRequired)?;
        let mac = hash.hmac(&session.ski, &[domain.as_bytes()]);
        Ok(AddRequest {
            mac,
            domain: domain.to_owned(),
        })
    }

    pub fn start_get_vault(&mut self, hash: &HashAlgorithm, domain: &str) -> Result<GetRequest> {
        let session = self.session.clone().ok_or(OnlineSphinxError::LoginRequired)?;
        let (k, kinv) = group_math::blind(&session.q);
        let bmk = group_math::exp_in_group(&session.mk, &k, &session.q);
        let mac = hash.hmac(&session.ski, &[bmk.to_bytes_be().as_slice()]);

        self.pending_get = Some(PendingGet { kinv });

        Ok(GetRequest {
            mac,
            domain: domain.to_owned(),
            bmk,
            q: session.q,
        })
    }

    /// recovers the derived per-domain password as a canonical hex string
    pub fn finish_get_vault(&mut self, response: &GetResponse) -> Result<String> {
        let pending = self
            .pending_get
            .take()
            .ok_or(OnlineSphinxError::LoginRequired)?;
        let session = self.session.as_ref().ok_or(OnlineSphinxError::LoginRequired)?;
        let b0 = group_math::unblind(&response.bj, &pending.kinv, &session.q);
        let rwd = group_math::exp_in_group(&b0, &session.k, &session.q) * response.qj.clone();
        Ok((&rwd).into())
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.pending_login = None;
        self.pending_get = None;
    }
}
