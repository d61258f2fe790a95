//! Open tank with a single mass balance.

use crate::error::SimResult;
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;
use tk_core::units::{Area, Length, Volume};
use tk_core::{ensure_positive, m3};

/// Tolerance on the overflow test, absorbs float drift at the ceiling.
pub const OVERFLOW_EPSILON_M3: f64 = 1e-6;

pub const DEFAULT_CROSS_SECTION_AREA_M2: f64 = 1.2;
pub const DEFAULT_MAX_HEIGHT_M: f64 = 1.0;

/// Net volumetric balance over one tick: dV/dt = q_in - q_out.
#[derive(Clone, Copy, Debug)]
pub struct MassBalance {
    pub q_in_m3ps: f64,
    pub q_out_m3ps: f64,
}

impl TransientModel for MassBalance {
    type State = f64;

    fn rhs(&self, _t: f64, _volume: &f64) -> f64 {
        self.q_in_m3ps - self.q_out_m3ps
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn scale(&self, a: &f64, scale: f64) -> f64 {
        a * scale
    }
}

/// Tank geometry and stored volume.
///
/// Invariant: `0 <= volume_m3 <= max_volume_m3()` after every `advance`.
/// Shrinking the cross-section does not touch the stored volume; the next
/// `advance` clamps it and `level` reports a clamped fraction meanwhile.
#[derive(Clone, Debug, PartialEq)]
pub struct Tank {
    cross_section_area_m2: f64,
    max_height_m: f64,
    volume_m3: f64,
}

impl Default for Tank {
    fn default() -> Self {
        Self {
            cross_section_area_m2: DEFAULT_CROSS_SECTION_AREA_M2,
            max_height_m: DEFAULT_MAX_HEIGHT_M,
            volume_m3: 0.0,
        }
    }
}

impl Tank {
    /// Create an empty tank.
    ///
    /// # Errors
    ///
    /// Zero, negative or non-finite geometry is a configuration error.
    pub fn new(cross_section_area_m2: f64, max_height_m: f64) -> SimResult<Self> {
        let cross_section_area_m2 = ensure_positive(cross_section_area_m2, "cross_section_area")?;
        let max_height_m = ensure_positive(max_height_m, "max_height")?;
        Ok(Self {
            cross_section_area_m2,
            max_height_m,
            volume_m3: 0.0,
        })
    }

    /// Create an empty tank from typed dimensions.
    pub fn from_dimensions(area: Area, height: Length) -> SimResult<Self> {
        Self::new(area.value, height.value)
    }

    /// Set the initial volume, clamped into `[0, max_volume]`.
    pub fn with_volume(mut self, volume_m3: f64) -> Self {
        self.volume_m3 = self.clamp_volume(volume_m3);
        self
    }

    pub fn cross_section_area_m2(&self) -> f64 {
        self.cross_section_area_m2
    }

    pub fn max_height_m(&self) -> f64 {
        self.max_height_m
    }

    pub fn max_volume_m3(&self) -> f64 {
        self.cross_section_area_m2 * self.max_height_m
    }

    pub fn max_volume(&self) -> Volume {
        m3(self.max_volume_m3())
    }

    pub fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    /// Change the cross-section live. Takes effect on `max_volume` at once.
    pub fn set_cross_section_area(&mut self, area_m2: f64) -> SimResult<()> {
        self.cross_section_area_m2 = ensure_positive(area_m2, "cross_section_area")?;
        Ok(())
    }

    /// One explicit Euler step of the mass balance, clamped to the tank.
    ///
    /// Pure in its inputs. A negative `dt` is treated as zero.
    pub fn step(&self, volume_in_m3: f64, dt_s: f64, q_in_m3ps: f64, q_out_m3ps: f64) -> f64 {
        let balance = MassBalance {
            q_in_m3ps,
            q_out_m3ps,
        };
        let raw = ForwardEuler.step(&balance, 0.0, &volume_in_m3, dt_s.max(0.0));
        if raw.is_nan() {
            return self.clamp_volume(volume_in_m3);
        }
        self.clamp_volume(raw)
    }

    /// Step the stored volume in place and return it.
    pub fn advance(&mut self, dt_s: f64, q_in_m3ps: f64, q_out_m3ps: f64) -> f64 {
        self.volume_m3 = self.step(self.volume_m3, dt_s, q_in_m3ps, q_out_m3ps);
        self.volume_m3
    }

    /// Fill fraction in `[0, 1]`.
    pub fn level(&self, volume_m3: f64) -> f64 {
        (volume_m3 / self.max_volume_m3()).clamp(0.0, 1.0)
    }

    pub fn is_overflow(&self, volume_m3: f64) -> bool {
        volume_m3 >= self.max_volume_m3() - OVERFLOW_EPSILON_M3
    }

    /// Fill fraction of the stored volume.
    pub fn current_level(&self) -> f64 {
        self.level(self.volume_m3)
    }

    pub fn is_overflowing(&self) -> bool {
        self.is_overflow(self.volume_m3)
    }

    /// Drain to empty.
    pub fn empty(&mut self) {
        self.volume_m3 = 0.0;
    }

    fn clamp_volume(&self, volume_m3: f64) -> f64 {
        if volume_m3.is_nan() {
            return 0.0;
        }
        volume_m3.clamp(0.0, self.max_volume_m3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tk_core::units::{m, m2};

    fn reference_tank() -> Tank {
        Tank::new(1.2, 1.0).unwrap()
    }

    #[test]
    fn default_geometry() {
        let tank = Tank::default();
        assert_eq!(tank.max_volume_m3(), 1.2);
        assert_eq!(tank.volume_m3(), 0.0);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(Tank::new(0.0, 1.0).is_err());
        assert!(Tank::new(1.2, -1.0).is_err());
        assert!(Tank::new(f64::NAN, 1.0).is_err());
        assert!(reference_tank().set_cross_section_area(0.0).is_err());
    }

    #[test]
    fn typed_dimensions() {
        let tank = Tank::from_dimensions(m2(2.0), m(0.5)).unwrap();
        assert!((tank.max_volume_m3() - 1.0).abs() < 1e-12);
        assert!((tk_core::to_m3(tank.max_volume()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fill_from_empty() {
        let tank = reference_tank();
        let v = tank.step(0.0, 1.0, 0.8, 0.35);
        assert!((v - 0.45).abs() < 1e-12);
        assert!((tank.level(v) * 100.0 - 37.5).abs() < 1e-9);
    }

    #[test]
    fn drain_with_inlet_closed() {
        let tank = reference_tank();
        let v = tank.step(1.1, 1.0, 0.0, 0.35);
        assert!((v - 0.75).abs() < 1e-12);
    }

    #[test]
    fn clamps_at_ceiling_and_reports_overflow() {
        let tank = reference_tank();
        let v = tank.step(1.19999, 1.0, 1.5, 0.0);
        assert_eq!(v, 1.2);
        assert!(tank.is_overflow(v));
    }

    #[test]
    fn clamps_at_floor() {
        let tank = reference_tank();
        assert_eq!(tank.step(0.1, 1.0, 0.0, 1.2), 0.0);
    }

    #[test]
    fn overflow_threshold() {
        let tank = reference_tank();
        assert!(!tank.is_overflow(1.2 - 0.01));
        assert!(tank.is_overflow(1.2 - 1e-7));
        assert!(tank.is_overflow(1.2));
    }

    #[test]
    fn negative_dt_is_no_op() {
        let tank = reference_tank();
        assert_eq!(tank.step(0.5, -0.2, 1.0, 0.0), 0.5);
    }

    #[test]
    fn shrinking_area_clamps_on_next_step() {
        let mut tank = reference_tank().with_volume(1.0);
        tank.set_cross_section_area(0.5).unwrap();
        // Stored volume untouched until the next step
        assert_eq!(tank.volume_m3(), 1.0);
        assert_eq!(tank.current_level(), 1.0);
        tank.advance(0.0, 0.0, 0.0);
        assert_eq!(tank.volume_m3(), 0.5);
    }

    #[test]
    fn with_volume_clamps() {
        let tank = reference_tank().with_volume(5.0);
        assert_eq!(tank.volume_m3(), 1.2);
        let tank = reference_tank().with_volume(-1.0);
        assert_eq!(tank.volume_m3(), 0.0);
    }

    proptest! {
        #[test]
        fn step_stays_in_bounds(
            frac in 0.0_f64..=1.0,
            dt in 0.0_f64..=0.1,
            q_in in 0.0_f64..10.0,
            q_out in 0.0_f64..10.0,
        ) {
            let tank = reference_tank();
            let v = tank.step(frac * tank.max_volume_m3(), dt, q_in, q_out);
            prop_assert!(v >= 0.0);
            prop_assert!(v <= tank.max_volume_m3());
        }

        #[test]
        fn zero_dt_is_identity(
            frac in 0.0_f64..=1.0,
            q_in in 0.0_f64..10.0,
            q_out in 0.0_f64..10.0,
        ) {
            let tank = reference_tank();
            let v = frac * tank.max_volume_m3();
            prop_assert_eq!(tank.step(v, 0.0, q_in, q_out), v);
        }

        #[test]
        fn filled_volume_grows_with_dt(
            q_in in 0.01_f64..1.5,
            dt_a in 0.0_f64..0.1,
            dt_b in 0.0_f64..0.1,
        ) {
            let tank = reference_tank();
            let (lo, hi) = if dt_a <= dt_b { (dt_a, dt_b) } else { (dt_b, dt_a) };
            let filled = |dt: f64| tank.level(tank.step(0.0, dt, q_in, 0.0)) * tank.max_volume_m3();
            prop_assert!(filled(lo) <= filled(hi));
        }
    }
}
