use derive_more::{Display, Error};
use num_bigint::{BigUint, RandBigInt};
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Debug, Formatter};

pub use num_traits::{One, Zero};
pub use std::ops::{Add, Mul, Rem, Sub};

/// [`BigNumber`] wraps [`BigUint`] and adds the conversions the protocol
/// needs: canonical hex, big/little-endian byte arrays, and uniform
/// random draws.
#[derive(PartialEq, Eq, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BigNumber(BigUint);

#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum BigNumberError {
    #[display("invalid hex string")]
    InvalidHexStr,
}

impl Default for BigNumber {
    fn default() -> Self {
        Self(BigUint::new(vec![]))
    }
}

impl BigNumber {
    /// a uniformly random value in `[0, 2^n_bits)`
    pub fn new_rand_bits(n_bits: u64) -> Self {
        let mut rng = thread_rng();
        Self(rng.gen_biguint(n_bits))
    }

    /// a uniformly random value in `[0, 2^(n_bytes*8))`
    pub fn new_rand(n_bytes: usize) -> Self {
        Self::new_rand_bits((n_bytes * 8) as u64)
    }

    /// a uniformly random value in `[0, bound)`
    pub fn new_rand_below(bound: &Self) -> Self {
        let mut rng = thread_rng();
        Self(rng.gen_biguint_below(&bound.0))
    }

    /// [`raw`] is expected to be big endian
    pub fn from_bytes_be(raw: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(raw))
    }

    /// [`raw`] is expected to be little endian
    pub fn from_bytes_le(raw: &[u8]) -> Self {
        Self(BigUint::from_bytes_le(raw))
    }

    /// from a hex string; hex strings are always big endian
    pub fn from_hex_str_be(str: &str) -> Result<Self, BigNumberError> {
        let str = if str.is_empty() {
            "00".to_owned()
        } else if str.len() % 2 != 0 {
            format!("{:0>len$}", str, len = (str.len() / 2 + 1) * 2)
        } else {
            str.to_owned()
        };

        Ok(Self::from_bytes_be(
            hex::decode(str).map_err(|_| BigNumberError::InvalidHexStr)?.as_slice(),
        ))
    }

    pub fn modpow(&self, exponent: &Self, modulo: &Self) -> Self {
        self.0.modpow(&exponent.0, &modulo.0).into()
    }

    pub fn num_bytes(&self) -> usize {
        (self.0.bits() as usize + 7) / 8
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// returns the byte vec in big endian byte order
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// returns the byte vec in little endian byte order
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_bytes_le()
    }

    pub fn to_array<const N: usize>(&self) -> [u8; N] {
        self.to_array_pad_zero::<N>()
    }

    /// returns the byte vec in little endian byte order, padded by 0 for `N` bytes
    pub fn to_array_pad_zero<const N: usize>(&self) -> [u8; N] {
        let mut r = [0_u8; N];
        for (i, x) in self.to_vec().iter().take(N).enumerate() {
            r[i] = *x;
        }
        r
    }

    pub fn is_even(&self) -> bool {
        (&self.0 % 2u8).is_zero()
    }
}

impl Debug for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigNumber(\"{}\")", self)
    }
}

impl From<u32> for BigNumber {
    fn from(n: u32) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<u64> for BigNumber {
    fn from(n: u64) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<BigUint> for BigNumber {
    fn from(a: BigUint) -> Self {
        Self(a)
    }
}

impl<const N: usize> From<[u8; N]> for BigNumber {
    fn from(k: [u8; N]) -> Self {
        Self::from_bytes_le(&k)
    }
}

impl From<&[u8]> for BigNumber {
    fn from(somewhere: &[u8]) -> Self {
        Self::from_bytes_le(somewhere)
    }
}

/// canonical hex: lowercase, no leading zeros except the single "0" for zero
impl From<&BigNumber> for String {
    fn from(x: &BigNumber) -> Self {
        if x.0.is_zero() {
            return "0".to_owned();
        }
        x.0.to_str_radix(16)
    }
}

impl From<BigNumber> for String {
    fn from(x: BigNumber) -> Self {
        (&x).into()
    }
}

impl TryFrom<&str> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_hex_str_be(value)
    }
}

impl TryFrom<String> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex_str_be(value.as_str())
    }
}

impl Rem for &BigNumber {
    type Output = BigNumber;

    fn rem(self, rhs: &BigNumber) -> Self::Output {
        (&self.0).rem(&rhs.0).into()
    }
}
impl Rem for BigNumber {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        (&self).rem(&rhs)
    }
}

impl Mul for BigNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        (self.0 * rhs.0).into()
    }
}
impl Mul for &BigNumber {
    type Output = BigNumber;

    fn mul(self, rhs: Self) -> Self::Output {
        (&self.0 * &rhs.0).into()
    }
}

impl Add for BigNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.0.add(rhs.0).into()
    }
}
impl<'b> Add<&'b BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: &'b BigNumber) -> Self::Output {
        (&self.0).add(&rhs.0).into()
    }
}

impl Sub for BigNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0.sub(rhs.0).into()
    }
}
impl<'b> Sub<&'b BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn sub(self, rhs: &'b BigNumber) -> Self::Output {
        (&self.0).sub(&rhs.0).into()
    }
}

impl std::fmt::Display for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let x: String = self.into();
        write!(f, "{}", x)
    }
}

impl Zero for BigNumber {
    fn zero() -> Self {
        BigUint::zero().into()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for BigNumber {
    fn one() -> Self {
        BigUint::from(1u8).into()
    }
}
