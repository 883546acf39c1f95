use crate::error::GameError;

/// Number of pins in a full rack.
pub const PIN_COUNT: usize = 10;

/// A set of pin identifiers (0..=9), stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PinSet {
    bits: u16,
}

impl PinSet {
    const FULL_MASK: u16 = (1 << PIN_COUNT) - 1;

    /// Create an empty set
    pub fn empty() -> Self {
        PinSet { bits: 0 }
    }

    /// Create a set holding every pin of the rack
    pub fn full() -> Self {
        PinSet {
            bits: Self::FULL_MASK,
        }
    }

    /// Build a set from reported identifiers.
    ///
    /// Rejects more than [`PIN_COUNT`] entries, identifiers outside `0..=9`,
    /// and repeated identifiers.
    pub fn from_ids(ids: &[u8]) -> Result<Self, GameError> {
        if ids.len() > PIN_COUNT {
            return Err(GameError::invalid_input(format!(
                "reported {} downed pins, a rack only has {}",
                ids.len(),
                PIN_COUNT
            )));
        }

        let mut set = PinSet::empty();
        for &id in ids {
            if usize::from(id) >= PIN_COUNT {
                return Err(GameError::invalid_input(format!(
                    "pin id {id} is out of range 0..={}",
                    PIN_COUNT - 1
                )));
            }
            if !set.insert(id) {
                return Err(GameError::invalid_input(format!(
                    "pin id {id} reported more than once"
                )));
            }
        }
        Ok(set)
    }

    /// Add a pin, returns false if it was already present.
    /// Ids outside the rack are ignored.
    pub fn insert(&mut self, id: u8) -> bool {
        if usize::from(id) >= PIN_COUNT {
            return false;
        }
        let mask = 1 << id;
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    pub fn contains(&self, id: u8) -> bool {
        usize::from(id) < PIN_COUNT && self.bits & (1 << id) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True when every pin of the rack is down
    pub fn is_full_rack(&self) -> bool {
        self.bits == Self::FULL_MASK
    }

    /// True if every pin in `other` is also in `self`
    pub fn is_superset(&self, other: &PinSet) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Identifiers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..PIN_COUNT as u8).filter(move |&id| self.contains(id))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}
