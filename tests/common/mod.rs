#![allow(dead_code)]

use dist_algebra::{RandomSource, Result};
use std::collections::{HashMap, VecDeque};

/// One recorded call into the random source.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub family: &'static str,
    pub params: Vec<f64>,
}

/// Random source that records calls and returns scripted values.
///
/// Unscripted families echo their first parameter, so a uniform selection
/// draw returns 0 and picks the first outcome.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub calls: Vec<Draw>,
    fixed: HashMap<&'static str, f64>,
    queued: HashMap<&'static str, VecDeque<f64>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, family: &'static str, value: f64) -> Self {
        self.fixed.insert(family, value);
        self
    }

    pub fn queue(mut self, family: &'static str, values: &[f64]) -> Self {
        self.queued
            .entry(family)
            .or_default()
            .extend(values.iter().copied());
        self
    }

    pub fn families(&self) -> Vec<&'static str> {
        self.calls.iter().map(|c| c.family).collect()
    }

    fn record(&mut self, family: &'static str, params: &[f64]) -> Result<f64> {
        self.calls.push(Draw {
            family,
            params: params.to_vec(),
        });
        if let Some(next) = self.queued.get_mut(family).and_then(VecDeque::pop_front) {
            return Ok(next);
        }
        Ok(self.fixed.get(family).copied().unwrap_or(params[0]))
    }
}

impl RandomSource for ScriptedSource {
    fn normal(&mut self, mean: f64, sd: f64) -> Result<f64> {
        self.record("normal", &[mean, sd])
    }

    fn lognormal(&mut self, mean: f64, sd: f64) -> Result<f64> {
        self.record("lognormal", &[mean, sd])
    }

    fn uniform(&mut self, low: f64, high: f64) -> Result<f64> {
        self.record("uniform", &[low, high])
    }

    #[allow(clippy::cast_precision_loss)]
    fn binomial(&mut self, trials: u64, p: f64) -> Result<f64> {
        self.record("binomial", &[trials as f64, p])
    }

    fn beta(&mut self, a: f64, b: f64) -> Result<f64> {
        self.record("beta", &[a, b])
    }

    fn bernoulli(&mut self, p: f64) -> Result<f64> {
        self.record("bernoulli", &[p])
    }

    fn gamma(&mut self, shape: f64, scale: f64) -> Result<f64> {
        self.record("gamma", &[shape, scale])
    }

    fn poisson(&mut self, lambda: f64) -> Result<f64> {
        self.record("poisson", &[lambda])
    }

    fn exponential(&mut self, scale: f64) -> Result<f64> {
        self.record("exponential", &[scale])
    }

    fn triangular(&mut self, left: f64, mode: f64, right: f64) -> Result<f64> {
        self.record("triangular", &[left, mode, right])
    }

    fn standard_t(&mut self, df: f64) -> Result<f64> {
        self.record("t", &[df])
    }

    fn chisquare(&mut self, df: f64) -> Result<f64> {
        self.record("chisquare", &[df])
    }
}
