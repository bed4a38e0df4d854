//! Numeric parameters of a model: variable index and bias types.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul};

/// Integer type used to label variables.
///
/// Variables are dense, zero-based indices. Conversions to and from `usize`
/// are plain casts: choosing a narrow index type means accepting wraparound
/// once the model outgrows it.
pub trait Variable: Copy + Ord + Hash + Debug + Send + Sync + 'static {
    /// Convert a position in the adjacency vector to a variable.
    fn from_index(index: usize) -> Self;

    /// Position of this variable in the adjacency vector.
    fn index(self) -> usize;

    /// Position of this variable, or `None` if it has no non-negative
    /// `usize` representation. Never asserts, so it is safe on external data.
    fn checked_index(self) -> Option<usize>;
}

/// Numeric type used for linear and quadratic biases.
pub trait Bias:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Default
    + Add<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Additive identity; the bias of an absent term.
    const ZERO: Self;
}

macro_rules! impl_unsigned_variable {
    ($($t:ty),*) => {
        $(
            impl Variable for $t {
                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn from_index(index: usize) -> Self {
                    index as $t
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn index(self) -> usize {
                    self as usize
                }

                #[inline]
                fn checked_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

macro_rules! impl_signed_variable {
    ($($t:ty),*) => {
        $(
            impl Variable for $t {
                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn from_index(index: usize) -> Self {
                    index as $t
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn index(self) -> usize {
                    debug_assert!(self >= 0, "negative variable index {self}");
                    self as usize
                }

                #[inline]
                fn checked_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

impl_unsigned_variable!(u16, u32, u64, usize);
impl_signed_variable!(i32, i64);

impl Bias for f32 {
    const ZERO: Self = 0.0;
}

impl Bias for f64 {
    const ZERO: Self = 0.0;
}
