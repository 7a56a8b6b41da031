// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Random alphabetic strings used to make resource names unique.
//!
//! The values only disambiguate names inside a stack. They are not secrets,
//! so sampling uses the thread local, non-cryptographic generator and no
//! upper bound is placed on the length.

use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::str::FromStr;

use log::trace;
use rand::Rng;

use crate::errors::{Error, Result};

pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A validated, strictly positive string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringLength(NonZeroUsize);

impl StringLength {
    pub fn new(length: usize) -> Option<StringLength> {
        NonZeroUsize::new(length).map(StringLength)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for StringLength {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(StringLength::new)
            .ok_or(Error::InvalidLength(value))
    }
}

impl FromStr for StringLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidStringLength(s.to_string()))?;
        StringLength::try_from(value)
    }
}

impl Display for StringLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a string of `length` characters drawn uniformly from [`ALPHABET`].
///
/// Fails with [`Error::InvalidLength`] when `length` is zero or negative.
pub fn generate(length: i64) -> Result<String> {
    let length = StringLength::try_from(length)?;
    Ok(generate_with(&mut rand::thread_rng(), length))
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: StringLength) -> String {
    trace!("Generating random string of length {}", length);
    (0..length.get())
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod random_tests;
