use crate::{
    constants::{
        DEFAULT_MAX_PADDING, DEFAULT_MAX_ROOM_SIZE, DEFAULT_MIN_PADDING, DEFAULT_MIN_ROOM_SIZE,
        MAX_GRID_EXTENT, MIN_ROOM_EXTENT,
    },
    error::{GeneratorError, Result},
};

use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "cli", derive(clap::Args))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockBuilderConfig {
    /// Smallest empty margin kept between a room and its region edge
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MIN_PADDING))]
    pub min_padding: u32,
    /// Largest empty margin kept between a room and its region edge
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_PADDING))]
    pub max_padding: u32,
    /// Smallest side of a freshly generated room, walls included
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MIN_ROOM_SIZE))]
    pub min_room_size: u32,
    /// Largest side of a freshly generated room, walls included
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_ROOM_SIZE))]
    pub max_room_size: u32,
}

impl Default for DockBuilderConfig {
    fn default() -> Self {
        DockBuilderConfig {
            min_padding: DEFAULT_MIN_PADDING,
            max_padding: DEFAULT_MAX_PADDING,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
        }
    }
}

impl DockBuilderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_room_size < MIN_ROOM_EXTENT
            || self.min_room_size > self.max_room_size
            || self.max_room_size > MAX_GRID_EXTENT
        {
            return Err(GeneratorError::InvalidRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
                floor: MIN_ROOM_EXTENT,
                ceiling: MAX_GRID_EXTENT,
            });
        }

        if self.min_padding > self.max_padding
            || self.max_padding > MAX_GRID_EXTENT
            || self.padded_min_room_extent() > MAX_GRID_EXTENT as u64
        {
            return Err(GeneratorError::InvalidPadding {
                min: self.min_padding,
                max: self.max_padding,
                ceiling: MAX_GRID_EXTENT,
            });
        }

        Ok(())
    }

    /// The smallest region side that can still hold a room and its padding.
    pub fn padded_min_room(&self) -> i32 {
        i32::try_from(self.padded_min_room_extent()).unwrap_or(i32::MAX)
    }

    fn padded_min_room_extent(&self) -> u64 {
        self.min_room_size as u64 + self.min_padding as u64 * 2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DockBuilderConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.padded_min_room(), 8);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = DockBuilderConfig {
            min_padding: 5,
            max_padding: 2,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(GeneratorError::InvalidPadding {
                min: 5,
                max: 2,
                ceiling: MAX_GRID_EXTENT
            })
        );

        let config = DockBuilderConfig {
            min_room_size: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidRoomSize { min: 2, .. })
        ));

        let config = DockBuilderConfig {
            min_room_size: 9,
            max_room_size: 8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let config = DockBuilderConfig {
            min_padding: 2,
            max_padding: 2,
            min_room_size: 5,
            max_room_size: 5,
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_values_beyond_grid_extent() {
        let config = DockBuilderConfig {
            min_padding: 1_500_000_000,
            max_padding: 1_500_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidPadding { .. })
        ));
        assert_eq!(
            config.padded_min_room(),
            i32::MAX,
            "Huge padding must not wrap to a negative extent"
        );

        let config = DockBuilderConfig {
            min_room_size: 3_000_000_000,
            max_room_size: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidRoomSize { .. })
        ));

        let config = DockBuilderConfig {
            max_room_size: MAX_GRID_EXTENT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DockBuilderConfig {
            max_padding: MAX_GRID_EXTENT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // A padded minimum room just past the cap
        let config = DockBuilderConfig {
            min_padding: 2_046,
            max_padding: 2_046,
            min_room_size: 6,
            max_room_size: 6,
        };
        assert!(config.validate().is_err());

        let config = DockBuilderConfig {
            min_padding: 2_045,
            max_padding: 2_045,
            min_room_size: 6,
            max_room_size: 6,
        };
        assert!(config.validate().is_ok());
    }
}
