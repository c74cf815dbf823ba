/*!
Canonical, transport-independent encoding of every wire message (spec
§4.5/§6.1): big integers are encoded as lowercase hex with no leading
zeros (except the single digit `"0"` for zero), MACs as lowercase hex
bytes, domains and lists of domains as plain UTF-8. Fields are joined
in the struct's declared order with `|` as a separator, so the codec
can be wrapped by any transport (HTTP/JSON, a raw socket, ...) without
this module knowing which.
*/
use std::convert::TryFrom;

use crate::big_number::BigNumber;
use crate::primitives::{
    AddRequest, ChallengeRequest, ChallengeResponse, ErrorResponse, ExpKRequest, ExpKResponse,
    GetRequest, GetResponse, MetadataRequest, MetadataResponse, RegisterRequest,
};
use crate::{OnlineSphinxError, Result};

const SEP: char = '|';
const LIST_SEP: char = ',';

fn encode_big(n: &BigNumber) -> String {
    n.into()
}

fn decode_big(field: &str) -> Result<BigNumber> {
    BigNumber::try_from(field).map_err(|_| OnlineSphinxError::WireDecodeError)
}

fn encode_mac(mac: &[u8]) -> String {
    hex::encode(mac)
}

fn decode_mac(field: &str) -> Result<Vec<u8>> {
    hex::decode(field).map_err(|_| OnlineSphinxError::WireDecodeError)
}

fn split_fields(raw: &str, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = raw.split(SEP).collect();
    if fields.len() != expected {
        return Err(OnlineSphinxError::WireDecodeError);
    }
    Ok(fields)
}

/// implemented by every wire message; `encode`/`decode` are the
/// canonical, transport-independent pair
pub trait WireCodec: Sized {
    fn encode(&self) -> String;
    fn decode(raw: &str) -> Result<Self>;
}

impl WireCodec for RegisterRequest {
    fn encode(&self) -> String {
        encode_big(&self.c_id)
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(RegisterRequest {
            c_id: decode_big(raw)?,
        })
    }
}

impl WireCodec for ExpKRequest {
    fn encode(&self) -> String {
        [
            encode_big(&self.c_id),
            encode_big(&self.c_nonce),
            encode_big(&self.b),
            encode_big(&self.q),
        ]
        .join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 4)?;
        Ok(ExpKRequest {
            c_id: decode_big(f[0])?,
            c_nonce: decode_big(f[1])?,
            b: decode_big(f[2])?,
            q: decode_big(f[3])?,
        })
    }
}

impl WireCodec for ExpKResponse {
    fn encode(&self) -> String {
        [
            encode_big(&self.s_id),
            encode_big(&self.s_nonce),
            encode_big(&self.bd),
            encode_big(&self.q0),
            encode_big(&self.kv),
        ]
        .join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 5)?;
        Ok(ExpKResponse {
            s_id: decode_big(f[0])?,
            s_nonce: decode_big(f[1])?,
            bd: decode_big(f[2])?,
            q0: decode_big(f[3])?,
            kv: decode_big(f[4])?,
        })
    }
}

impl WireCodec for ChallengeRequest {
    fn encode(&self) -> String {
        [encode_big(&self.g), encode_big(&self.q)].join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 2)?;
        Ok(ChallengeRequest {
            g: decode_big(f[0])?,
            q: decode_big(f[1])?,
        })
    }
}

impl WireCodec for ChallengeResponse {
    fn encode(&self) -> String {
        encode_big(&self.r)
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(ChallengeResponse { r: decode_big(raw)? })
    }
}

impl WireCodec for MetadataRequest {
    fn encode(&self) -> String {
        encode_mac(&self.mac)
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(MetadataRequest {
            mac: decode_mac(raw)?,
        })
    }
}

impl WireCodec for MetadataResponse {
    fn encode(&self) -> String {
        self.domains.join(&LIST_SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let domains = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split(LIST_SEP).map(str::to_owned).collect()
        };
        Ok(MetadataResponse { domains })
    }
}

impl WireCodec for AddRequest {
    fn encode(&self) -> String {
        [self.domain.clone(), encode_mac(&self.mac)].join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 2)?;
        Ok(AddRequest {
            domain: f[0].to_owned(),
            mac: decode_mac(f[1])?,
        })
    }
}

impl WireCodec for GetRequest {
    fn encode(&self) -> String {
        [
            self.domain.clone(),
            encode_mac(&self.mac),
            encode_big(&self.bmk),
            encode_big(&self.q),
        ]
        .join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 4)?;
        Ok(GetRequest {
            domain: f[0].to_owned(),
            mac: decode_mac(f[1])?,
            bmk: decode_big(f[2])?,
            q: decode_big(f[3])?,
        })
    }
}

impl WireCodec for GetResponse {
    fn encode(&self) -> String {
        [encode_big(&self.bj), encode_big(&self.qj)].join(&SEP.to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        let f = split_fields(raw, 2)?;
        Ok(GetResponse {
            bj: decode_big(f[0])?,
            qj: decode_big(f[1])?,
        })
    }
}

impl WireCodec for ErrorResponse {
    fn encode(&self) -> String {
        self.error.clone()
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(ErrorResponse {
            error: raw.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::big_number::Zero;

    #[test]
    fn should_round_trip_expk_request() {
        let req = ExpKRequest {
            c_id: BigNumber::from(11u32),
            c_nonce: BigNumber::from(22u32),
            b: BigNumber::from(33u32),
            q: BigNumber::from(23u32),
        };
        let encoded = req.encode();
        let decoded = ExpKRequest::decode(&encoded).unwrap();
        assert_eq!(decoded.c_id, req.c_id);
        assert_eq!(decoded.q, req.q);
    }

    #[test]
    fn should_round_trip_expk_response() {
        let resp = ExpKResponse {
            s_id: BigNumber::from(1u32),
            s_nonce: BigNumber::from(2u32),
            bd: BigNumber::from(3u32),
            q0: BigNumber::from(4u32),
            kv: BigNumber::from(5u32),
        };
        let decoded = ExpKResponse::decode(&resp.encode()).unwrap();
        assert_eq!(decoded.bd, resp.bd);
        assert_eq!(decoded.kv, resp.kv);
    }

    #[test]
    fn should_encode_zero_as_single_digit_on_the_wire() {
        let req = RegisterRequest {
            c_id: BigNumber::zero(),
        };
        assert_eq!(req.encode(), "0");
    }

    #[test]
    fn should_round_trip_metadata_response_with_domains() {
        let resp = MetadataResponse {
            domains: vec!["a.example".to_owned(), "b.example".to_owned()],
        };
        let decoded = MetadataResponse::decode(&resp.encode()).unwrap();
        assert_eq!(decoded.domains, resp.domains);
    }

    #[test]
    fn should_round_trip_empty_metadata_response() {
        let resp = MetadataResponse { domains: vec![] };
        let decoded = MetadataResponse::decode(&resp.encode()).unwrap();
        assert!(decoded.domains.is_empty());
    }

    #[test]
    fn should_round_trip_get_request() {
        let req = GetRequest {
            mac: vec![0xab, 0xcd],
            domain: "example.com".to_owned(),
            bmk: BigNumber::from(42u32),
            q: BigNumber::from(23u32),
        };
        let decoded = GetRequest::decode(&req.encode()).unwrap();
        assert_eq!(decoded.mac, req.mac);
        assert_eq!(decoded.domain, req.domain);
        assert_eq!(decoded.bmk, req.bmk);
    }

    #[test]
    fn should_reject_malformed_input() {
        assert!(ExpKRequest::decode("only-one-field").is_err());
    }

    #[test]
    fn should_round_trip_add_request_with_domain_first() {
        let req = AddRequest {
            domain: "example.com".to_owned(),
            mac: vec![0xab, 0xcd],
        };
        let encoded = req.encode();
        assert_eq!(encoded, "example.com|abcd");
        let decoded = AddRequest::decode(&encoded).unwrap();
        assert_eq!(decoded.domain, req.domain);
        assert_eq!(decoded.mac, req.mac);
    }

    #[test]
    fn should_round_trip_error_response() {
        let resp = ErrorResponse {
            error: "login required".to_owned(),
        };
        let decoded = ErrorResponse::decode(&resp.encode()).unwrap();
        assert_eq!(decoded.error, resp.error);
    }
}
