/*!
What the client persists locally, keyed by username: the per-user cID,
group order `q`, and long-term secret multiplier `k`. This is plain
local storage; no network or concurrency concerns apply here, unlike
[`crate::server_state::ServerState`].
*/
use std::collections::HashMap;

use crate::primitives::ClientUser;
use crate::{OnlineSphinxError, Result};

#[derive(Debug, Default)]
pub struct ClientState {
    users: HashMap<String, ClientUser>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user: ClientUser) {
        self.users.insert(user.username.clone(), user);
    }

    pub fn get(&self, username: &str) -> Result<&ClientUser> {
        self.users.get(username).ok_or(OnlineSphinxError::NotFound)
    }
}
