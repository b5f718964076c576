//! Allocator Settings
//!
//! Configuration for deriving the texture-unit budget from the limits the
//! graphics implementation reports.
//!
//! ```rust,ignore
//! use umbra::render::AllocatorSettings;
//!
//! // Keep two units back for the post-processing chain.
//! let settings = AllocatorSettings {
//!     reserved_units: 2,
//!     ..Default::default()
//! };
//! let allocator = TextureUnitAllocator::from_limits(&adapter.limits(), &settings, binder)?;
//! ```

use serde::{Deserialize, Serialize};
use umbra_core::errors::{Result, UmbraError};

/// Budget configuration for a [`TextureUnitAllocator`](crate::textures::TextureUnitAllocator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorSettings {
    /// Units withheld from the allocator, for bindings managed elsewhere.
    pub reserved_units: u32,
    /// Upper bound on the units handed out, regardless of what the hardware
    /// reports. `None` uses the full hardware count.
    pub max_units: Option<u32>,
}

impl AllocatorSettings {
    /// Checks the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_units {
            if max == 0 {
                return Err(UmbraError::InvalidSettings(
                    "max_units must be at least 1".to_string(),
                ));
            }
            if self.reserved_units >= max {
                return Err(UmbraError::InvalidSettings(format!(
                    "reserved_units ({}) must be below max_units ({max})",
                    self.reserved_units
                )));
            }
        }
        Ok(())
    }

    /// Number of units the allocator may hand out on hardware with `limits`.
    pub fn unit_count(&self, limits: &wgpu::Limits) -> Result<u32> {
        self.validate()?;

        let hardware = limits.max_sampled_textures_per_shader_stage;
        let capped = self.max_units.map_or(hardware, |max| max.min(hardware));
        let count = capped
            .checked_sub(self.reserved_units)
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                UmbraError::InvalidSettings(format!(
                    "reserved_units ({}) leaves no texture units out of {capped}",
                    self.reserved_units
                ))
            })?;

        log::debug!(
            "Texture unit budget: {count} (hardware {hardware}, reserved {})",
            self.reserved_units
        );
        Ok(count)
    }
}
