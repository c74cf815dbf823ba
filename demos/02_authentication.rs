use online_sphinx::*;
use std::time::{Duration, Instant};

fn main() {
    let username = "Bob";
    let password = "secret-password";

    let config = ServerConfig {
        s_id: BigNumber::from(1u32),
        k: BigNumber::from(2u32),
        q0: BigNumber::from(3u32),
        hash: HashAlgorithm::Sha256,
        bit_length: 512,
    };
    let server = Server::new(config);
    let mut client = Client::new();

    let register_request = client.register(username, 512);
    server.register(&register_request).unwrap();

    let mut durations: Duration = Duration::default();
    #[cfg(debug_assertions)]
    const NLOOPS: u32 = 3;
    #[cfg(not(debug_assertions))]
    const NLOOPS: u32 = 20;

    for i in 0..NLOOPS {
        let start = Instant::now();
        let token = format!("conn-{i}");

        // client side: blind the password and send ExpKRequest
        let expk_request = client
            .start_login(&server.config.hash, username, password)
            .unwrap();
        // server side: exponentiate obliviously, bind a session
        let expk_response = server.exp_k(&token, &expk_request).unwrap();
        // client side: recover ski and the master key mk
        client.finish_login(&server.config.hash, &expk_response).unwrap();

        // mutual proof of ski, without ever sending ski itself
        let (challenge_request, expected) = client.start_challenge().unwrap();
        let challenge_response = server.challenge(&token, &challenge_request).unwrap();
        Client::verify_challenge(&expected, &challenge_response).expect("server failed the challenge");

        server.logout(&token);
        client.logout();

        durations = durations.checked_add(start.elapsed()).unwrap();
    }

    println!("Time elapsed in auth is: {:?}", durations / NLOOPS);
}
