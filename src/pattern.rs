use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

use crate::{config::Config, error::QuizError};

/// Configuration for pattern generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
    pool: Vec<char>,
    length: usize,
}

impl PatternConfig {
    /// Builds a generation config, collapsing duplicate pool characters so
    /// every distinct character is equally likely.
    pub fn new(pool: &str, length: usize) -> Result<Self, QuizError> {
        let pool = pool.chars().unique().collect_vec();
        if pool.is_empty() {
            return Err(QuizError::InvalidConfig("pattern pool is empty".into()));
        }
        if length == 0 {
            return Err(QuizError::InvalidConfig(
                "pattern length must be at least 1".into(),
            ));
        }
        Ok(Self { pool, length })
    }

    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl TryFrom<&Config> for PatternConfig {
    type Error = QuizError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        Self::new(&cfg.pattern_pool, cfg.pattern_length)
    }
}

/// Supplies the pattern for each new round
pub trait PatternSource: Send + 'static {
    fn next_pattern(&mut self) -> String;
}

/// Uniform draws with replacement from the configured pool
pub struct RandomPatterns<R: Rng = StdRng> {
    config: PatternConfig,
    rng: R,
}

impl RandomPatterns<StdRng> {
    pub fn new(config: PatternConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: PatternConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPatterns<R> {
    pub fn with_rng(config: PatternConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn generate(&mut self) -> String {
        let pool = &self.config.pool;
        (0..self.config.length)
            .map(|_| pool[self.rng.gen_range(0..pool.len())])
            .collect()
    }
}

impl<R: Rng + Send + 'static> PatternSource for RandomPatterns<R> {
    fn next_pattern(&mut self) -> String {
        self.generate()
    }
}

/// Replays a fixed list of patterns, cycling when exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedPatterns {
    queue: VecDeque<String>,
}

impl ScriptedPatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

impl PatternSource for ScriptedPatterns {
    fn next_pattern(&mut self) -> String {
        match self.queue.pop_front() {
            Some(next) => {
                self.queue.push_back(next.clone());
                next
            }
            None => String::new(),
        }
    }
}
