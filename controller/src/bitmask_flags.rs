use num_traits::{One, PrimInt};

/// Trait implemented by flag enums declared with [`define_bitmask_flags!`].
///
/// The enum's discriminant (via `#[repr(u8)]`) is the bit index.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A set of flags packed into one primitive integer.
///
/// Used for button state: one set each for press edges, release edges and held level.
/// Merging two samples is a bitwise OR, so latching edges between ticks costs nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> Default for BitmaskFlags<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self::new(T::zero())
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    pub fn union(self, other: Self) -> Self {
        Self::new(self.bits | other.bits)
    }

    /// Flags in both `self` and `other`.
    pub fn intersection(self, other: Self) -> Self {
        Self::new(self.bits & other.bits)
    }

    /// Flags in `self` that are not in `other`.
    pub fn difference(self, other: Self) -> Self {
        Self::new(self.bits & !other.bits)
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    /// Returns the current flags and leaves the set empty.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::empty())
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// controller::define_bitmask_flags!(Pad, u8, {
///     South,
///     East,
/// });
/// let mut set = controller::bitmask_flags::BitmaskFlags::<u8>::default();
/// set.add(Pad::East);
/// assert!(set.has(Pad::East));
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
