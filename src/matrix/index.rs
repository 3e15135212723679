//! Index types usable for column indices and row offsets

use std::fmt;

use num_traits::{PrimInt, Unsigned};

/// Unsigned integer type stored in `col_indices` and `row_ptrs`
pub trait CsrIndex: PrimInt + Unsigned + fmt::Debug + Send + Sync + 'static {
    /// Widen to an offset into the value/column arrays
    fn to_offset(self) -> usize;

    /// Narrow an offset, `None` if it does not fit
    fn from_offset(offset: usize) -> Option<Self>;
}

macro_rules! impl_csr_index {
    ($($t:ty),*) => {
        $(
            impl CsrIndex for $t {
                #[inline]
                fn to_offset(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_offset(offset: usize) -> Option<Self> {
                    <$t>::try_from(offset).ok()
                }
            }
        )*
    };
}

// u64 is included for 64-bit hosts, where the widening is lossless.
impl_csr_index!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(7u16.to_offset(), 7);
        assert_eq!(u32::from_offset(42), Some(42));
        assert_eq!(u8::from_offset(256), None);
        assert_eq!(usize::from_offset(usize::MAX), Some(usize::MAX));
    }
}
