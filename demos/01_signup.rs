use online_sphinx::*;

fn main() {
    // this is what a user would enter in a form / terminal
    let new_username = "Bob";

    let mut client = Client::new();
    let register_request = client.register(new_username, 512);

    println!("Simulating a server and signup with user {}", new_username);
    println!(" - client identifier [cID] = {}", &register_request.c_id);
    println!("This is a one time action; the server now stores a fresh verifier for this cID");
    println!();
    println!("Next authentication process `cargo run --example 02_authentication`");
}
