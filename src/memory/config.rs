//! Configuration for managed memory resources

use crate::error::{Error, Result};

/// Parameters of a [`ManagedResource`](super::ManagedResource)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Minimum alignment of every block in bytes (power of two)
    ///
    /// Requests with a stricter layout alignment keep their own.
    pub alignment: usize,

    /// Name reported by the resource in logs and `Debug` output
    pub label: &'static str,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            alignment: aligned_vec::CACHELINE_ALIGN,
            label: "managed",
        }
    }
}

impl ResourceConfig {
    /// Config with the given minimum alignment and the default label
    pub fn with_alignment(alignment: usize) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a usable resource
    pub fn validate(&self) -> Result<()> {
        if !self.alignment.is_power_of_two() {
            return Err(Error::InvalidAlignment {
                alignment: self.alignment,
            });
        }
        Ok(())
    }
}
