//! Zoom level planning.
//!
//! Decides which of the requested zoom levels are actually producible for a
//! given source resolution. Levels whose target size exceeds the source on
//! both axes are silently dropped from the top of the range unless the
//! configuration allows upscaling that far; a narrower-than-requested
//! pyramid is a normal outcome, not an error.
//!
//! Planning is a pure function: the requested range in the configuration is
//! never mutated, the realized range comes back in the returned [`ZoomPlan`].

use crate::config::TileSetConfig;

/// One zoom level the planner decided to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevelPlan {
    /// Zoom level.
    pub zoom: u8,
    /// Target base image width, `2^zoom * tile_size`.
    pub target_width: u32,
    /// Target base image height, same as the width.
    pub target_height: u32,
    /// True when a non-empty base image already exists and overwrite is off.
    /// The base image build is skipped; the level is still tiled.
    pub skip: bool,
}

/// Outcome of planning: the realized zoom range next to the requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomPlan {
    requested_min: u8,
    requested_max: u8,
    levels: Vec<ZoomLevelPlan>,
    clamped_out: Vec<u8>,
}

impl ZoomPlan {
    /// Realized levels, highest zoom first.
    pub fn levels(&self) -> &[ZoomLevelPlan] {
        &self.levels
    }

    /// Realized zooms in tiling order, lowest first.
    pub fn zooms_ascending(&self) -> impl Iterator<Item = u8> + '_ {
        self.levels.iter().rev().map(|level| level.zoom)
    }

    /// Zoom levels dropped because the source is too small for them.
    pub fn clamped_out(&self) -> &[u8] {
        &self.clamped_out
    }

    /// Lowest zoom level as requested.
    pub fn requested_min(&self) -> u8 {
        self.requested_min
    }

    /// Highest zoom level as requested.
    pub fn requested_max(&self) -> u8 {
        self.requested_max
    }

    /// Lowest realized zoom level, `None` for an empty plan.
    pub fn realized_min(&self) -> Option<u8> {
        self.levels.last().map(|level| level.zoom)
    }

    /// Highest realized zoom level, `None` for an empty plan.
    pub fn realized_max(&self) -> Option<u8> {
        self.levels.first().map(|level| level.zoom)
    }

    /// True when every requested level was clamped out.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Plan the zoom levels for a source of the given dimensions.
///
/// Levels are visited from `zoom_max` down to `zoom_min` so the first level
/// that fits the source defines the realized ceiling:
///
/// - a level with an existing non-empty base image (and overwrite off) is
///   kept with `skip = true`,
/// - a level whose target exceeds the source on both axes is clamped out
///   (unless `scaling_up_limit` permits upscaling at that zoom), which also
///   discards any higher level visited before it,
/// - every other level is kept for building.
///
/// `level_exists` probes for an existing non-empty base image of a zoom
/// level; callers that have no outputs yet pass `|_| false`.
pub fn plan_zoom_levels(
    source_width: u32,
    source_height: u32,
    config: &TileSetConfig,
    level_exists: impl Fn(u8) -> bool,
) -> ZoomPlan {
    let mut levels = Vec::new();
    let mut clamped_out = Vec::new();

    for zoom in (config.zoom_min()..=config.zoom_max()).rev() {
        // Fits in u32, checked at configuration build time.
        let target = (u64::from(config.tile_size()) << zoom) as u32;

        if !config.force() && level_exists(zoom) {
            levels.push(ZoomLevelPlan {
                zoom,
                target_width: target,
                target_height: target,
                skip: true,
            });
            continue;
        }

        let upscale_allowed =
            config.scaling_up_limit() != 0 && zoom <= config.scaling_up_limit();
        if !upscale_allowed && target > source_width && target > source_height {
            // This level defines a new ceiling; anything kept above it
            // leaves the realized range as well.
            levels.clear();
            clamped_out.push(zoom);
            continue;
        }

        levels.push(ZoomLevelPlan {
            zoom,
            target_width: target,
            target_height: target,
            skip: false,
        });
    }

    ZoomPlan {
        requested_min: config.zoom_min(),
        requested_max: config.zoom_max(),
        levels,
        clamped_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileSetConfig;

    fn config(zoom_min: u8, zoom_max: u8) -> TileSetConfig {
        TileSetConfig::builder()
            .with_zoom_range(zoom_min, zoom_max)
            .build()
            .unwrap()
    }

    #[test]
    fn test_plan_within_source_resolution() {
        // 1024 pixels carry zooms 0..=2 at 256-pixel tiles.
        let plan = plan_zoom_levels(1024, 1024, &config(0, 2), |_| false);
        let zooms: Vec<u8> = plan.levels().iter().map(|l| l.zoom).collect();
        assert_eq!(zooms, vec![2, 1, 0]);
        assert_eq!(plan.realized_max(), Some(2));
        assert_eq!(plan.realized_min(), Some(0));
        assert!(plan.clamped_out().is_empty());
    }

    #[test]
    fn test_targets_double_per_level() {
        let plan = plan_zoom_levels(4096, 4096, &config(0, 4), |_| false);
        for level in plan.levels() {
            assert_eq!(level.target_width, 256u32 << level.zoom);
            assert_eq!(level.target_height, level.target_width);
        }
    }

    #[test]
    fn test_oversized_levels_clamp_silently() {
        let plan = plan_zoom_levels(1000, 600, &config(0, 8), |_| false);
        // 2^2 * 256 = 1024 > 1000 on both axes, so zoom 2 and up drop out.
        assert_eq!(plan.realized_max(), Some(1));
        assert_eq!(plan.clamped_out(), &[8, 7, 6, 5, 4, 3, 2]);
        assert_eq!(plan.requested_max(), 8);
    }

    #[test]
    fn test_one_long_axis_keeps_the_level() {
        // Clamping needs the target to exceed both axes.
        let plan = plan_zoom_levels(2048, 100, &config(0, 3), |_| false);
        assert_eq!(plan.realized_max(), Some(3));
    }

    #[test]
    fn test_fully_clamped_range_is_empty_not_an_error() {
        let plan = plan_zoom_levels(100, 100, &config(0, 3), |_| false);
        assert!(plan.is_empty());
        assert_eq!(plan.realized_max(), None);
        assert_eq!(plan.clamped_out(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_single_level_plan() {
        let plan = plan_zoom_levels(256, 256, &config(0, 0), |_| false);
        assert_eq!(plan.levels().len(), 1);
        assert_eq!(plan.realized_max(), Some(0));
    }

    #[test]
    fn test_scaling_up_limit_admits_small_sources() {
        let config = TileSetConfig::builder()
            .with_zoom_range(0, 4)
            .with_scaling_up_limit(2)
            .build()
            .unwrap();
        let plan = plan_zoom_levels(256, 256, &config, |_| false);
        // Zooms 1 and 2 upscale within the limit, 3 and 4 still clamp.
        assert_eq!(plan.realized_max(), Some(2));
        assert_eq!(plan.clamped_out(), &[4, 3]);
    }

    #[test]
    fn test_existing_levels_marked_skip() {
        let plan = plan_zoom_levels(1024, 1024, &config(0, 2), |zoom| zoom == 1);
        let level = plan.levels().iter().find(|l| l.zoom == 1).unwrap();
        assert!(level.skip);
        assert!(!plan.levels().iter().any(|l| l.zoom != 1 && l.skip));
    }

    #[test]
    fn test_force_ignores_existing_levels() {
        let config = TileSetConfig::builder()
            .with_zoom_range(0, 2)
            .with_force(true)
            .build()
            .unwrap();
        let plan = plan_zoom_levels(1024, 1024, &config, |_| true);
        assert!(plan.levels().iter().all(|l| !l.skip));
    }

    #[test]
    fn test_existing_oversized_level_survives_without_lower_clamp() {
        // An existing base image short-circuits the size check for its level.
        let plan = plan_zoom_levels(1024, 1024, &config(0, 3), |zoom| zoom == 3);
        assert_eq!(plan.realized_max(), Some(3));
        let top = &plan.levels()[0];
        assert!(top.skip);
    }

    #[test]
    fn test_clamp_discards_skipped_levels_above_it() {
        // Zoom 3 exists on disk, but zoom 2 clamps and caps the range below
        // both of them.
        let plan = plan_zoom_levels(600, 600, &config(0, 3), |zoom| zoom == 3);
        assert_eq!(plan.realized_max(), Some(1));
        assert!(!plan.levels().iter().any(|l| l.zoom == 3));
        assert_eq!(plan.clamped_out(), &[2]);
    }

    #[test]
    fn test_ascending_iteration_for_tiling() {
        let plan = plan_zoom_levels(1024, 1024, &config(0, 2), |_| false);
        let zooms: Vec<u8> = plan.zooms_ascending().collect();
        assert_eq!(zooms, vec![0, 1, 2]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_realized_ceiling_matches_clamp_rule(
                width in 1u32..100_000,
                height in 1u32..100_000,
                zoom_max in 0u8..12
            ) {
                let config = config(0, zoom_max);
                let plan = plan_zoom_levels(width, height, &config, |_| false);
                // Largest zoom whose target fits at least one axis.
                let expected = (0..=zoom_max)
                    .rev()
                    .find(|z| {
                        let target = 256u64 << z;
                        target <= width as u64 || target <= height as u64
                    });
                prop_assert_eq!(plan.realized_max(), expected);
            }

            #[test]
            fn test_levels_descend_contiguously(
                width in 1u32..100_000,
                height in 1u32..100_000,
                zoom_min in 0u8..6,
                span in 0u8..6
            ) {
                let config = config(zoom_min, zoom_min + span);
                let plan = plan_zoom_levels(width, height, &config, |_| false);
                let zooms: Vec<u8> = plan.levels().iter().map(|l| l.zoom).collect();
                for pair in zooms.windows(2) {
                    prop_assert_eq!(pair[0], pair[1] + 1);
                }
                if let (Some(max), Some(min)) = (plan.realized_max(), plan.realized_min()) {
                    prop_assert!(min == zoom_min);
                    prop_assert!(max <= zoom_min + span);
                }
            }

            #[test]
            fn test_realized_plus_clamped_cover_request(
                width in 1u32..100_000,
                height in 1u32..100_000,
                zoom_max in 0u8..10
            ) {
                let config = config(0, zoom_max);
                let plan = plan_zoom_levels(width, height, &config, |_| false);
                let total = plan.levels().len() + plan.clamped_out().len();
                prop_assert_eq!(total, zoom_max as usize + 1);
            }

            #[test]
            fn test_upscaling_never_happens_below_limit_zero(
                width in 1u32..10_000,
                height in 1u32..10_000,
                zoom_max in 0u8..10
            ) {
                let config = config(0, zoom_max);
                let plan = plan_zoom_levels(width, height, &config, |_| false);
                for level in plan.levels() {
                    let target = level.target_width as u64;
                    prop_assert!(
                        target <= width as u64 || target <= height as u64,
                        "level {} target {} exceeds {}x{}",
                        level.zoom, target, width, height
                    );
                }
            }
        }
    }
}
