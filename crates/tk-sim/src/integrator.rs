//! Fixed-step time integrators.

use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State;
}

/// Forward Euler (explicit, 1st order).
/// Exact for the tank, whose net inflow is constant over a tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        let xdot = model.rhs(t, x);
        model.add(x, &model.scale(&xdot, dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x
    struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn rhs(&self, _t: f64, x: &f64) -> f64 {
            -x
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    #[test]
    fn euler_single_step() {
        let x1 = ForwardEuler.step(&Decay, 0.0, &1.0, 0.1);
        assert!((x1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_is_identity() {
        let x1 = ForwardEuler.step(&Decay, 0.0, &0.7, 0.0);
        assert_eq!(x1, 0.7);
    }
}
