use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rand_hc::Hc128Rng;

use crate::simulation::monte_carlo::{Path, PathSampler};

/// Model params for the SDE
/// '''math
/// dX_t = mu dt + sigma dW_t
/// ''', where $dW_t ~ N(0, dt)$
/// https://en.wikipedia.org/wiki/Brownian_motion
#[derive(Clone, Copy, Debug)]
pub struct BrownianMotion {
    initial_value: f64,
    /// drift term
    mu: f64,
    /// volatility
    sigma: f64,
    /// change in time
    dt: f64,
}

impl BrownianMotion {
    pub fn new(initial_value: f64, drift: f64, vola: f64, dt: f64) -> Self {
        Self {
            initial_value,
            mu: drift,
            sigma: vola,
            dt,
        }
    }

    pub fn step(&self, xt: f64, z: f64) -> f64 {
        xt + self.mu * self.dt + self.sigma * self.dt.sqrt() * z
    }

    /// The path starting at the initial value, one step per standard normal.
    pub fn generate_path(&self, standard_normals: &[f64]) -> Path {
        generate(self.initial_value, standard_normals, |xt, z| self.step(xt, z))
    }
}

impl PathSampler for BrownianMotion {
    fn sample_path(&self, rn_generator: &mut Hc128Rng, nr_steps: usize) -> Path {
        let standard_normals: Vec<f64> = rn_generator
            .sample_iter(StandardNormal)
            .take(nr_steps)
            .collect();
        self.generate_path(&standard_normals)
    }
}

/// Model params for the SDE
/// '''math
/// dS_t / S_t = mu dt + sigma dW_t
/// ''', where $dW_t ~ N(0, dt)$
/// https://en.wikipedia.org/wiki/Geometric_Brownian_motion
#[derive(Clone, Copy, Debug)]
pub struct GeometricBrownianMotion {
    initial_value: f64,
    /// drift term
    mu: f64,
    /// volatility
    sigma: f64,
    /// change in time
    dt: f64,
}

impl GeometricBrownianMotion {
    pub fn new(initial_value: f64, drift: f64, vola: f64, dt: f64) -> Self {
        Self {
            initial_value,
            mu: drift,
            sigma: vola,
            dt,
        }
    }

    /// Exact solution over one step, so a single step of length T samples S_T.
    pub fn step(&self, st: f64, z: f64) -> f64 {
        let ret = self.dt * (self.mu - self.sigma.powi(2) / 2.0) + self.dt.sqrt() * self.sigma * z;
        st * ret.exp()
    }

    pub fn generate_path(&self, standard_normals: &[f64]) -> Path {
        generate(self.initial_value, standard_normals, |st, z| self.step(st, z))
    }
}

impl Distribution<f64> for GeometricBrownianMotion {
    /// One step ahead of the initial value.
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.step(self.initial_value, rng.sample(StandardNormal))
    }
}

impl PathSampler for GeometricBrownianMotion {
    fn sample_path(&self, rn_generator: &mut Hc128Rng, nr_steps: usize) -> Path {
        let standard_normals: Vec<f64> = rn_generator
            .sample_iter(StandardNormal)
            .take(nr_steps)
            .collect();
        self.generate_path(&standard_normals)
    }
}

fn generate(initial_value: f64, standard_normals: &[f64], step: impl Fn(f64, f64) -> f64) -> Path {
    let mut path = Vec::with_capacity(standard_normals.len() + 1);

    let mut curr_p = initial_value;
    path.push(curr_p);

    for z in standard_normals {
        curr_p = step(curr_p, *z);
        path.push(curr_p);
    }

    path
}
