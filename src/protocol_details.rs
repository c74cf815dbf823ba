/*!
A brief summary of the vocabulary and formulas of the Online SPHINX
protocol this crate implements.

## Vocabulary

```plain
p     modulus, p = 2q+1                    (q is prime, chosen per user)
q     the group order, per-user, chosen by the client at Register time
q0    the server's own fixed group order, used for the final masking step
g     a generator used for a single Challenge round
k     a blinding factor, freshly drawn for each oblivious exchange
cID   the client's per-user identifier, fixed at Register time
sID   the server's identifier, constant across all sessions
cNonce, sNonce  fresh per-Login nonces
ski   the per-session key derived from the login exchange
mk    the client's per-user master key, derived once per login
rwd   the derived per-domain password returned by GetVault
H()   the configured hash function (SHA-256 by default)
```

## Formulas

Login (client blinds its master secret, server exponentiates obliviously):
```plain
cNonce, k  = <fresh random>
kinv       = k^-1 mod q         (0 if no inverse exists, including q <= 1)
g          = (H(password) mod q)^2 mod p
B          = g^k mod p
<send cID, cNonce, B, q to server>

server:
bd = B^b mod p                  (b: server's per-user ephemeral secret)
kv = <the verifier stored for this cID>
<reply sID, sNonce, bd, q0, kv>

client:
B0  = bd^kinv mod p
ski = HMAC(H, kv, cID | sID | cNonce | sNonce)
mk  = (B0^k mod p) * q0         (an ordinary integer product, not reduced)
```

Challenge (mutual proof of ski, without ever sending ski itself):
```plain
g = <fresh random>
r = g^ski mod p
<client and server each recompute r and compare>
```

GetVault (the same oblivious exponentiation, keyed by mk instead of the
master password, to recover one domain's derived password):
```plain
k, kinv = <fresh random, as above>
bmk     = mk^k mod p
<send mac, domain, bmk, q to server>

server:
bj = bmk^qj mod p               (qj: the server's per-domain secret)
<reply bj, qj>

client:
B0  = bj^kinv mod p
rwd = (B0^k mod p) * qj
```

## Safeguards

1. The blinding factor `k` must never be logged or persisted; only its
   public image (`B`, `bmk`) crosses the wire.
2. If `gcd(k, q) != 1`, `kinv` falls back to `0` rather than aborting —
   this mirrors the behavior of the reference implementation, whose
   underlying big-integer library returns no inverse in that case; a
   `kinv` of `0` simply yields an unblinded value of `1` downstream.
   `q <= 1` has no nonzero residue to draw `k` from at all, and falls
   back the same way rather than looping forever.
3. Every MAC-authenticated operation (`GetMetadata`, `AddVault`,
   `GetVault`) must compare MACs in constant time.

## References

This vocabulary condenses the "Online SPHINX" password-manager
protocol: an oblivious pseudo-random function evaluated jointly by
client and server so that per-domain passwords are derived without the
server ever learning the client's master password.
*/
