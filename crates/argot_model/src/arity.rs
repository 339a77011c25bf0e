//! Arity ranges.

/// Declared minimum/maximum number of value tokens a symbol accepts.
/// `max == u32::MAX` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    pub min: u32,
    pub max: u32,
}

impl Arity {
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "arity min {min} exceeds max {max}");
        Self { min, max }
    }

    pub const fn zero() -> Self {
        Self { min: 0, max: 0 }
    }

    pub const fn zero_or_one() -> Self {
        Self { min: 0, max: 1 }
    }

    pub const fn exactly_one() -> Self {
        Self { min: 1, max: 1 }
    }

    pub const fn zero_or_more() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }

    pub const fn one_or_more() -> Self {
        Self {
            min: 1,
            max: u32::MAX,
        }
    }

    pub fn is_unbounded(self) -> bool {
        self.max == u32::MAX
    }

    pub fn contains(self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }
}
