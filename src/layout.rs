//! Staged address arithmetic: app `id` is linked at `base + id * step`.

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressLayout {
    pub base: u64,
    pub step: u64,
}

impl AddressLayout {
    pub fn new(base: u64, step: u64) -> Result<Self> {
        if step == 0 {
            bail!("address step must be nonzero");
        }
        Ok(Self { base, step })
    }

    /// Load address of app `id`. Overflow is an error, not a wrap.
    pub fn address_of(&self, id: usize) -> Result<u64> {
        self.step
            .checked_mul(id as u64)
            .and_then(|offset| self.base.checked_add(offset))
            .with_context(|| {
                format!(
                    "address overflow for app {id} (base {:#x}, step {:#x})",
                    self.base, self.step
                )
            })
    }

    /// The hex token the patcher looks for in the linker script.
    pub fn base_token(&self) -> String {
        hex_token(self.base)
    }
}

/// Lowercase `0x…` rendering — the form linker scripts carry and the form
/// substituted into them.
pub fn hex_token(addr: u64) -> String {
    format!("{addr:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_step_from_base() {
        let layout = AddressLayout::new(0x8040_0000, 0x2_0000).unwrap();
        assert_eq!(layout.address_of(0).unwrap(), 0x8040_0000);
        assert_eq!(layout.address_of(1).unwrap(), 0x8042_0000);
        assert_eq!(layout.address_of(5).unwrap(), 0x804a_0000);
    }

    #[test]
    fn test_zero_step_rejected() {
        assert!(AddressLayout::new(0x8040_0000, 0).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        let layout = AddressLayout::new(u64::MAX - 0x100, 0x2_0000).unwrap();
        assert!(layout.address_of(1).is_err());
    }

    #[test]
    fn test_hex_token_is_lowercase() {
        assert_eq!(hex_token(0x8040_0000), "0x80400000");
        assert_eq!(hex_token(0x804A_0000), "0x804a0000");
    }
}
