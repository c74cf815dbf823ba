/*!
The server's volatile connection-token → session binding. Unlike
[`crate::server_state::ServerState`], nothing here outlives a
connection: a fresh token is minted at `Login`/`Challenge` and
destroyed at `Logout`.
*/
use std::collections::HashMap;
use std::sync::Mutex;

use crate::big_number::BigNumber;
use crate::primitives::Session;
use crate::{OnlineSphinxError, Result};

#[derive(Debug, Default)]
pub struct SessionBinding {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, token: &str, c_id: BigNumber, s_id: BigNumber, ski: Vec<u8>) {
        let mut sessions = self.sessions.lock().expect("session lock poisoned");
        sessions.insert(token.to_owned(), Session { c_id, s_id, ski });
    }

    pub fn lookup(&self, token: &str) -> Result<Session> {
        let sessions = self.sessions.lock().expect("session lock poisoned");
        sessions
            .get(token)
            .cloned()
            .ok_or(OnlineSphinxError::LoginRequired)
    }

    pub fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.lock().expect("session lock poisoned");
        sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_bind_then_lookup_a_session() {
        let bindings = SessionBinding::new();
        bindings.bind("conn-1", BigNumber::from(1u32), BigNumber::from(2u32), vec![9, 9]);
        let session = bindings.lookup("conn-1").unwrap();
        assert_eq!(session.ski, vec![9, 9]);
    }

    #[test]
    fn should_require_login_for_unknown_token() {
        let bindings = SessionBinding::new();
        let err = bindings.lookup("nope").unwrap_err();
        assert_eq!(err, OnlineSphinxError::LoginRequired);
    }

    #[test]
    fn should_forget_session_on_logout() {
        let bindings = SessionBinding::new();
        bindings.bind("conn-1", BigNumber::from(1u32), BigNumber::from(2u32), vec![1]);
        bindings.destroy("conn-1");
        assert!(bindings.lookup("conn-1").is_err());
    }
}
