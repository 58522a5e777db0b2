use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::address::NormalizedAddress;

/// Ordered addresses with no repeats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    addresses: Vec<NormalizedAddress>,
}

impl AddressList {
    /// Keep the first occurrence of every address, in input order
    pub fn dedup<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = NormalizedAddress>,
    {
        let mut seen = HashSet::new();
        let addresses = addresses
            .into_iter()
            .filter(|address| seen.insert(*address))
            .collect();

        Self { addresses }
    }

    /// Apply one uniform random permutation
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.addresses.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn as_slice(&self) -> &[NormalizedAddress] {
        &self.addresses
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a NormalizedAddress;
    type IntoIter = std::slice::Iter<'a, NormalizedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}
