use rand::SeedableRng;
use rand_hc::Hc128Rng;

pub type Path = Vec<f64>;
pub type PathSlice = [f64];

/// A process which can be sampled path by path from a seeded generator.
pub trait PathSampler {
    fn sample_path(&self, rn_generator: &mut Hc128Rng, nr_steps: usize) -> Path;
}

pub struct MonteCarloPathSimulator {
    pub nr_paths: usize,
    pub nr_steps: usize,
}

impl MonteCarloPathSimulator {
    pub fn new(nr_paths: usize, nr_steps: usize) -> Self {
        Self { nr_paths, nr_steps }
    }

    /// Sample `nr_paths` paths; the same seed yields the same paths.
    pub fn simulate_paths(&self, seed_nr: u64, sampler: &impl PathSampler) -> Vec<Path> {
        let mut rn_generator = Hc128Rng::seed_from_u64(seed_nr);
        (0..self.nr_paths)
            .map(|_| sampler.sample_path(&mut rn_generator, self.nr_steps))
            .collect()
    }
}

pub struct PathEvaluator<'a> {
    paths: &'a [Path],
}

impl<'a> PathEvaluator<'a> {
    pub fn new(paths: &'a [Path]) -> Self {
        Self { paths }
    }

    pub fn evaluate(&self, path_fn: impl Fn(&'a PathSlice) -> Option<f64>) -> Vec<Option<f64>> {
        self.paths.iter().map(|path| path_fn(path)).collect()
    }

    /// Average of `path_fn` over all paths, counting paths without a value as zero.
    pub fn evaluate_average(&self, path_fn: impl Fn(&'a PathSlice) -> Option<f64>) -> Option<f64> {
        if self.paths.is_empty() {
            return None;
        }
        let total = self
            .paths
            .iter()
            .filter_map(|path| path_fn(path))
            .fold(None, |acc: Option<f64>, value| Some(acc.unwrap_or(0.0) + value))?;
        Some(total / self.paths.len() as f64)
    }
}
