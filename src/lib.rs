/*!
An implementation of the Online SPHINX oblivious password manager
protocol: a client and a server jointly derive a per-domain password
from a master password, through a blinded exponentiation in a cyclic
group, without the server ever learning the master password or any
derived plaintext.

# Usage
See the demos.

# Further details and protocol vocabulary
- [protocol vocabulary and formulas][`protocol_details`]
*/
use derive_more::{Display, Error};

#[cfg(doc)]
pub mod protocol_details;
#[cfg(not(doc))]
mod protocol_details;

pub(crate) mod primitives;

mod api;
mod big_number;
mod client_state;
mod group_math;
mod hash;
mod server_state;
mod session;
mod wire;

pub use api::client::Client;
pub use api::server::Server;
pub use big_number::BigNumber;
pub use group_math::GroupParams;
pub use hash::HashAlgorithm;
pub use primitives::{
    AddRequest, ChallengeRequest, ChallengeResponse, ClientUser, ErrorResponse, ExpKRequest,
    ExpKResponse, GetRequest, GetResponse, MetadataRequest, MetadataResponse, RegisterRequest,
    ServerConfig, ServerUser, UserCredentials, Vault,
};
pub use wire::WireCodec;

/// encapsulates an [`OnlineSphinxError`]
pub type Result<T> = std::result::Result<T, OnlineSphinxError>;

#[derive(Error, Display, Debug, PartialEq, Eq, serde::Serialize)]
pub enum OnlineSphinxError {
    #[display("no such user or session")]
    NotFound,

    #[display("a user with this client identifier is already registered")]
    AlreadyRegistered,

    #[display("no such domain in the user's vault")]
    DomainNotFound,

    #[display("a login is required before this operation")]
    LoginRequired,

    #[display("the provided MAC does not match")]
    MacMismatch,

    #[display("authentication failed")]
    AuthenticationFailed,

    #[display("failed to decode a wire message")]
    WireDecodeError,

    #[display("storage error: {_0}")]
    StorageError(#[error(not(source))] String),

    #[display("network error: {_0}")]
    NetworkError(#[error(not(source))] String),
}

/// the wire rendering a transport sends back for any failed operation
impl From<&OnlineSphinxError> for ErrorResponse {
    fn from(err: &OnlineSphinxError) -> Self {
        ErrorResponse {
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_login(client: &mut Client, server: &Server, username: &str, password: &str, token: &str) {
        let expk_req = client.start_login(&server.config.hash, username, password).unwrap();
        let expk_resp = server.exp_k(token, &expk_req).unwrap();
        client.finish_login(&server.config.hash, &expk_resp).unwrap();
    }

    /// full handshake end-to-end, no data transfer
    #[test]
    fn test_handshake_quick() {
        let config = ServerConfig {
            s_id: BigNumber::from(42u32),
            k: BigNumber::from(19u32),
            q0: BigNumber::from(23u32),
            hash: HashAlgorithm::Sha256,
            bit_length: 64,
        };
        let server = Server::new(config);
        let mut client = Client::new();

        let register_req = client.register("bob", 64);
        server.register(&register_req).unwrap();

        full_login(&mut client, &server, "bob", "secret-password", "conn-1");

        let (challenge_req, expected) = client.start_challenge().unwrap();
        let challenge_resp = server.challenge("conn-1", &challenge_req).unwrap();
        Client::verify_challenge(&expected, &challenge_resp).unwrap();

        let add_req = client.add_vault_request(&server.config.hash, "example.com").unwrap();
        server.add_vault("conn-1", &add_req).unwrap();

        let meta_req = client.metadata_request(&server.config.hash).unwrap();
        let meta_resp = server.get_metadata("conn-1", &meta_req).unwrap();
        assert_eq!(Client::read_metadata(meta_resp), vec!["example.com".to_string()]);

        let get_req = client
            .start_get_vault(&server.config.hash, "example.com")
            .unwrap();
        let get_resp = server.get_vault("conn-1", &get_req).unwrap();
        let rwd1 = client.finish_get_vault(&get_resp).unwrap();

        // deriving the same domain's password twice yields the same result
        let get_req2 = client
            .start_get_vault(&server.config.hash, "example.com")
            .unwrap();
        let get_resp2 = server.get_vault("conn-1", &get_req2).unwrap();
        let rwd2 = client.finish_get_vault(&get_resp2).unwrap();
        assert_eq!(rwd1, rwd2);

        server.logout("conn-1");
        client.logout();
    }

    /// a handshake simulating data transfer over the wire codec
    #[test]
    fn test_handshake_wire_roundtrip() {
        let config = ServerConfig {
            s_id: BigNumber::from(7u32),
            k: BigNumber::from(13u32),
            q0: BigNumber::from(29u32),
            hash: HashAlgorithm::Sha256,
            bit_length: 64,
        };
        let server = Server::new(config);
        let mut client = Client::new();

        let register_req = client.register("fred", 64);
        let transfer = register_req.encode();
        let register_req = RegisterRequest::decode(&transfer).unwrap();
        server.register(&register_req).unwrap();

        let expk_req = client
            .start_login(&server.config.hash, "fred", "password_fred")
            .unwrap();
        let transfer = expk_req.encode();
        let expk_req = ExpKRequest::decode(&transfer).unwrap();
        let expk_resp = server.exp_k("conn-9", &expk_req).unwrap();
        let transfer = expk_resp.encode();
        let expk_resp = ExpKResponse::decode(&transfer).unwrap();
        client.finish_login(&server.config.hash, &expk_resp).unwrap();

        let (challenge_req, expected) = client.start_challenge().unwrap();
        let transfer = challenge_req.encode();
        let challenge_req = ChallengeRequest::decode(&transfer).unwrap();
        let challenge_resp = server.challenge("conn-9", &challenge_req).unwrap();
        let transfer = challenge_resp.encode();
        let challenge_resp = ChallengeResponse::decode(&transfer).unwrap();
        Client::verify_challenge(&expected, &challenge_resp).unwrap();
    }

    #[test]
    fn should_fail_login_for_unregistered_user() {
        let mut client = Client::new();
        let err = client
            .start_login(&HashAlgorithm::Sha256, "ghost", "pw")
            .unwrap_err();
        assert_eq!(err, OnlineSphinxError::NotFound);
    }

    #[test]
    fn should_fail_double_registration() {
        let config = ServerConfig {
            s_id: BigNumber::from(1u32),
            k: BigNumber::from(2u32),
            q0: BigNumber::from(3u32),
            hash: HashAlgorithm::Sha256,
            bit_length: 64,
        };
        let server = Server::new(config);
        let mut client = Client::new();
        let req = client.register("dupe", 64);
        server.register(&req).unwrap();
        let err = server.register(&req).unwrap_err();
        assert_eq!(err, OnlineSphinxError::AlreadyRegistered);
    }

    #[test]
    fn should_render_error_as_error_response() {
        let resp: ErrorResponse = (&OnlineSphinxError::MacMismatch).into();
        assert_eq!(resp.error, "the provided MAC does not match");
    }
}
