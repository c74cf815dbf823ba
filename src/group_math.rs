use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::big_number::BigNumber;
use crate::hash::HashAlgorithm;

/// group parameters shared by every protocol step that works in the
/// cyclic group of order q modulo p = 2q+1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupParams {
    pub q: BigNumber,
    pub hash: HashAlgorithm,
}

impl GroupParams {
    pub fn modulus(&self) -> BigNumber {
        &(&self.q + &self.q) + &BigNumber::one()
    }
}

/// g^k mod p, with p = 2q+1
pub fn exp_in_group(g: &BigNumber, k: &BigNumber, q: &BigNumber) -> BigNumber {
    let p = &(q + q) + &BigNumber::one();
    log::trace!("exp_in_group g={} k={} q={} -> p={}", g, k, q, p);
    let result = g.modpow(k, &p);
    log::debug!("exp_in_group result={}", result);
    result
}

/// folds (a, b) back into a group element via the configured hash
pub fn hash_in_group(hash: &HashAlgorithm, a: &BigNumber, b: &BigNumber, q: &BigNumber) -> BigNumber {
    let digest = hash.hash_big_numbers(a, b);
    &digest % q
}

/// folds a cleartext password into a group element, the starting point
/// of every Login: `exp_in_group(H(password) mod q, 2, q)`
pub fn hash_password_in_group(hash: &HashAlgorithm, password: &str, q: &BigNumber) -> BigNumber {
    let digest = hash.digest(&[password.as_bytes()]);
    let h = &BigNumber::from_bytes_be(&digest) % q;
    exp_in_group(&h, &BigNumber::from(2u32), q)
}

/// a random blinding factor k, nonzero in [1, q) whenever q allows it,
/// together with its modular inverse; when no inverse exists
/// (gcd(k, q) != 1) the inverse falls back to 0, mirroring the
/// observed behavior of the reference implementation's
/// `big.Int.ModInverse`, which returns nil in that case. When `q <= 1`
/// the only residue is `0`, which has no inverse either, so `k = 0` is
/// accepted rather than looped on forever.
pub fn blind(q: &BigNumber) -> (BigNumber, BigNumber) {
    let k = if q <= &BigNumber::one() {
        BigNumber::zero()
    } else {
        loop {
            let candidate = BigNumber::new_rand_below(q);
            if !candidate.is_zero() {
                break candidate;
            }
        }
    };
    let kinv = mod_inverse(&k, q).unwrap_or_else(BigNumber::zero);
    (k, kinv)
}

/// recovers the unblinded group element: exp_in_group(blinded, kinv, q)
pub fn unblind(blinded: &BigNumber, kinv: &BigNumber, q: &BigNumber) -> BigNumber {
    exp_in_group(blinded, kinv, q)
}

/// extended Euclidean algorithm based modular inverse; returns `None`
/// when `a` and `m` are not coprime
pub fn mod_inverse(a: &BigNumber, m: &BigNumber) -> Option<BigNumber> {
    use num_bigint::BigInt;

    let a_bytes = a.to_bytes_be();
    let m_bytes = m.to_bytes_be();
    let a_int = BigInt::from_bytes_be(num_bigint::Sign::Plus, &a_bytes);
    let m_int = BigInt::from_bytes_be(num_bigint::Sign::Plus, &m_bytes);

    let (mut old_r, mut r) = (a_int.clone(), m_int.clone());
    let (mut old_s, mut s) = (BigInt::from(1), BigInt::from(0));

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let tmp_r = &old_r - &quotient * &r;
        old_r = r;
        r = tmp_r;
        let tmp_s = &old_s - &quotient * &s;
        old_s = s;
        s = tmp_s;
    }

    if old_r != BigInt::from(1) {
        return None;
    }

    let mut result = old_s % &m_int;
    if result < BigInt::zero() {
        result += &m_int;
    }
    let (_, bytes) = result.to_bytes_be();
    Some(BigNumber::from_bytes_be(&bytes))
}

/// generates a random odd prime of the requested bit length using
/// trial division against small primes followed by Miller-Rabin
pub fn gen_prime(bits: u64) -> BigNumber {
    loop {
        let mut candidate = BigNumber::new_rand_bits(bits);
        candidate = &candidate | &BigNumber::one();
        if candidate.bits() < bits {
            continue;
        }
        if is_probable_prime(&candidate, 20) {
            return candidate;
        }
    }
}

const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin probabilistic primality test with `rounds` independent
/// witnesses
pub fn is_probable_prime(n: &BigNumber, rounds: u32) -> bool {
    let one = BigNumber::one();
    let two = BigNumber::from(2u32);

    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES {
        let p = BigNumber::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^r
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d = d_div2(&d);
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = loop {
            let candidate = BigNumber::new_rand_below(&n_minus_one);
            if candidate > one {
                break candidate;
            }
        };
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 0..r - 1 {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn d_div2(d: &BigNumber) -> BigNumber {
    let bytes = d.to_bytes_be();
    let n = num_bigint::BigUint::from_bytes_be(&bytes) >> 1u32;
    BigNumber::from_bytes_be(&n.to_bytes_be())
}

impl std::ops::BitOr for &BigNumber {
    type Output = BigNumber;

    fn bitor(self, rhs: Self) -> BigNumber {
        use num_bigint::BigUint;
        let a = BigUint::from_bytes_be(&self.to_bytes_be());
        let b = BigUint::from_bytes_be(&rhs.to_bytes_be());
        BigNumber::from_bytes_be(&(a | b).to_bytes_be())
    }
}
