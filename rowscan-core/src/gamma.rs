//! Gamma correction
//!
//! LEDs driven by duty cycle look far brighter at low intensities than a
//! linear ramp suggests. A [`GammaTable`] maps linear intensities onto
//! perceptually spaced ones before they reach the frame store.

use crate::config::ConfigError;

/// 256-entry intensity lookup table
#[derive(Clone, PartialEq, Eq)]
pub struct GammaTable {
    table: [u8; 256],
}

impl core::fmt::Debug for GammaTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GammaTable")
            .field("low", &&self.table[..4])
            .field("mid", &self.table[128])
            .finish()
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl GammaTable {
    /// Table for `out = round(255 * (in / 255) ^ gamma)`
    pub fn new(gamma: f32) -> Result<Self, ConfigError> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(ConfigError::InvalidGamma);
        }

        let mut table = [0u8; 256];
        for (i, out) in table.iter_mut().enumerate() {
            let x = i as f32 / 255.0;
            let y = libm::roundf(255.0 * libm::powf(x, gamma));
            *out = y.clamp(0.0, 255.0) as u8;
        }
        Ok(Self { table })
    }

    /// Pass-through table
    pub const fn identity() -> Self {
        let mut table = [0u8; 256];
        let mut i = 0;
        while i < 256 {
            table[i] = i as u8;
            i += 1;
        }
        Self { table }
    }

    /// Map one intensity
    #[inline]
    pub fn apply(&self, intensity: u8) -> u8 {
        self.table[intensity as usize]
    }

    /// Full lookup table, indexed by input intensity
    pub fn as_slice(&self) -> &[u8; 256] {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_fixed() {
        for gamma in [0.45, 1.0, 2.2, 2.8] {
            let table = GammaTable::new(gamma).unwrap();
            assert_eq!(table.apply(0), 0);
            assert_eq!(table.apply(255), 255);
        }
    }

    #[test]
    fn test_monotonic() {
        for gamma in [0.5, 1.8, 2.2, 3.0] {
            let table = GammaTable::new(gamma).unwrap();
            for pair in table.as_slice().windows(2) {
                assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn test_unit_gamma_is_identity() {
        assert_eq!(GammaTable::new(1.0).unwrap(), GammaTable::identity());
    }

    #[test]
    fn test_darkens_midtones() {
        let table = GammaTable::new(2.2).unwrap();
        // 255 * 0.5^2.2 ≈ 55.4
        assert_eq!(table.apply(128), 56);
        assert!(table.apply(1) == 0);
    }

    #[test]
    fn test_rejects_bad_gamma() {
        assert_eq!(GammaTable::new(0.0), Err(ConfigError::InvalidGamma));
        assert_eq!(GammaTable::new(-1.0), Err(ConfigError::InvalidGamma));
        assert_eq!(GammaTable::new(f32::NAN), Err(ConfigError::InvalidGamma));
        assert_eq!(GammaTable::new(f32::INFINITY), Err(ConfigError::InvalidGamma));
    }
}
