//! SPK query engine.
//!
//! [`Engine`] holds one or more loaded SPK kernels and answers
//! target-relative-to-observer state queries by chaining segments through
//! the NAIF body hierarchy down to the solar system barycenter.

use std::collections::HashMap;
use std::path::PathBuf;

use jpl_kernel::{KernelError, SpkEvaluation, SpkKernel};
use selene_time::Epoch;
use thiserror::Error;

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub spk_paths: Vec<PathBuf>,
}

impl EngineConfig {
    /// Convenience constructor for single-kernel use.
    pub fn with_single_spk(spk_path: PathBuf) -> Self {
        Self {
            spk_paths: vec![spk_path],
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.spk_paths.is_empty() {
            return Err(EngineError::InvalidConfig("spk_paths must not be empty"));
        }
        if self.spk_paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(EngineError::InvalidConfig(
                "spk_paths must not contain empty paths",
            ));
        }
        Ok(())
    }
}

/// Bodies the report needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Earth,
    Moon,
}

impl Body {
    /// NAIF body code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Earth => 399,
            Self::Moon => 301,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(Self::Sun),
            399 => Some(Self::Earth),
            301 => Some(Self::Moon),
            _ => None,
        }
    }
}

/// Origin of a relative state vector.
///
/// Topocentric sites are built on top of `Body(Earth)` queries in
/// `selene_sky`; they do not belong here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observer {
    SolarSystemBarycenter,
    Body(Body),
}

impl Observer {
    pub const fn code(self) -> i32 {
        match self {
            Self::SolarSystemBarycenter => 0,
            Self::Body(body) => body.code(),
        }
    }
}

/// Single ephemeris request. Output is in the ICRF/J2000 axes of the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub target: Body,
    pub observer: Observer,
    pub epoch: Epoch,
}

/// Cartesian state vector output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Core engine errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    #[error("unsupported query: {0}")]
    UnsupportedQuery(&'static str),
    #[error("cannot load SPK kernel {path}")]
    KernelLoad {
        path: PathBuf,
        #[source]
        source: KernelError,
    },
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Telemetry from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub evaluations: u32,
    pub cache_hits: u32,
}

/// Per-request memoization context.
///
/// Target and observer chains share links (Moon and Earth both pass
/// through the Earth-Moon barycenter), so one query evaluates each
/// `(target, center)` segment once. Keys use the epoch's bit pattern.
struct ComputationContext {
    cache: HashMap<(i32, i32, u64), SpkEvaluation>,
    evaluations: u32,
    cache_hits: u32,
}

impl ComputationContext {
    fn new() -> Self {
        Self {
            cache: HashMap::with_capacity(8),
            evaluations: 0,
            cache_hits: 0,
        }
    }

    fn stats(&self) -> QueryStats {
        QueryStats {
            evaluations: self.evaluations,
            cache_hits: self.cache_hits,
        }
    }
}

/// Core query engine.
pub struct Engine {
    config: EngineConfig,
    spk_kernels: Vec<SpkKernel>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_segments: usize = self.spk_kernels.iter().map(|k| k.segments().len()).sum();
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("spk_kernel_count", &self.spk_kernels.len())
            .field("spk_total_segments", &total_segments)
            .finish()
    }
}

impl Engine {
    /// Create a new engine, loading SPK kernels from the config paths.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut spk_kernels = Vec::with_capacity(config.spk_paths.len());
        for path in &config.spk_paths {
            let spk = SpkKernel::load(path).map_err(|source| EngineError::KernelLoad {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(
                path = %path.display(),
                segments = spk.segments().len(),
                "loaded SPK kernel"
            );
            spk_kernels.push(spk);
        }
        Ok(Self {
            config,
            spk_kernels,
        })
    }

    /// Build an engine around kernels already in memory.
    pub fn from_kernels(spk_kernels: Vec<SpkKernel>) -> Result<Self, EngineError> {
        if spk_kernels.is_empty() {
            return Err(EngineError::InvalidConfig("at least one kernel is required"));
        }
        Ok(Self {
            config: EngineConfig { spk_paths: vec![] },
            spk_kernels,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn spk_kernels(&self) -> &[SpkKernel] {
        &self.spk_kernels
    }

    /// Evaluate `(target, center)` from the first kernel that covers the
    /// epoch.
    fn evaluate_across(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
        ctx: &mut ComputationContext,
    ) -> Result<SpkEvaluation, KernelError> {
        let key = (target, center, epoch_tdb_s.to_bits());
        if let Some(cached) = ctx.cache.get(&key) {
            ctx.cache_hits += 1;
            return Ok(*cached);
        }

        let mut last_err = KernelError::SegmentNotFound { target, center };
        for kernel in &self.spk_kernels {
            match kernel.evaluate(target, center, epoch_tdb_s) {
                Ok(eval) => {
                    ctx.evaluations += 1;
                    ctx.cache.insert(key, eval);
                    return Ok(eval);
                }
                Err(e @ KernelError::EpochOutOfRange { .. }) => last_err = e,
                Err(KernelError::SegmentNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    fn center_for_across(&self, target: i32) -> Option<i32> {
        self.spk_kernels.iter().find_map(|k| k.center_for(target))
    }

    /// Walk the segment chain from `body_code` to the SSB (code 0) across
    /// all loaded kernels, with the `x99` → barycenter fallback.
    fn resolve_to_ssb_across(
        &self,
        body_code: i32,
        epoch_tdb_s: f64,
        ctx: &mut ComputationContext,
    ) -> Result<[f64; 6], KernelError> {
        let mut code = body_code;
        let mut state = [0.0f64; 6];

        while code != 0 {
            let center = match self.center_for_across(code) {
                Some(c) => c,
                None => {
                    let bary = jpl_kernel::planet_body_to_barycenter(code);
                    if bary != code {
                        code = bary;
                        continue;
                    }
                    return Err(KernelError::SegmentNotFound {
                        target: code,
                        center: -1,
                    });
                }
            };

            let eval = self.evaluate_across(code, center, epoch_tdb_s, ctx)?;
            for i in 0..3 {
                state[i] += eval.position_km[i];
                state[i + 3] += eval.velocity_km_s[i];
            }
            code = center;
        }

        Ok(state)
    }

    /// Evaluate a query, returning a Cartesian state vector.
    pub fn query(&self, query: Query) -> Result<StateVector, EngineError> {
        let mut ctx = ComputationContext::new();
        self.query_with_ctx(query, &mut ctx)
    }

    /// Evaluate a query and return telemetry alongside the result.
    pub fn query_with_stats(&self, query: Query) -> Result<(StateVector, QueryStats), EngineError> {
        let mut ctx = ComputationContext::new();
        let state = self.query_with_ctx(query, &mut ctx)?;
        Ok((state, ctx.stats()))
    }

    fn query_with_ctx(
        &self,
        query: Query,
        ctx: &mut ComputationContext,
    ) -> Result<StateVector, EngineError> {
        let epoch_tdb_s = query.epoch.as_tdb_seconds();
        if !epoch_tdb_s.is_finite() {
            return Err(EngineError::InvalidQuery("epoch must be finite"));
        }
        if let Observer::Body(body) = query.observer
            && body == query.target
        {
            return Err(EngineError::UnsupportedQuery(
                "target and observer body cannot be identical",
            ));
        }

        let target_ssb = self.resolve_to_ssb_across(query.target.code(), epoch_tdb_s, ctx)?;
        let observer_ssb = match query.observer {
            Observer::SolarSystemBarycenter => [0.0f64; 6],
            Observer::Body(body) => self.resolve_to_ssb_across(body.code(), epoch_tdb_s, ctx)?,
        };

        Ok(StateVector {
            position_km: [
                target_ssb[0] - observer_ssb[0],
                target_ssb[1] - observer_ssb[1],
                target_ssb[2] - observer_ssb[2],
            ],
            velocity_km_s: [
                target_ssb[3] - observer_ssb[3],
                target_ssb[4] - observer_ssb[4],
                target_ssb[5] - observer_ssb[5],
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rejects_empty_spk_paths() {
        let config = EngineConfig { spk_paths: vec![] };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn engine_rejects_empty_path_in_spk_paths() {
        let config = EngineConfig::with_single_spk(PathBuf::new());
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_kernel_reports_path() {
        let path = PathBuf::from("/nonexistent/de421.bsp");
        let err = Engine::new(EngineConfig::with_single_spk(path.clone())).unwrap_err();
        match err {
            EngineError::KernelLoad { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, KernelError::Io(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn from_kernels_requires_one() {
        assert!(matches!(
            Engine::from_kernels(vec![]),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn body_codes_roundtrip() {
        for body in [Body::Sun, Body::Earth, Body::Moon] {
            assert_eq!(Body::from_code(body.code()), Some(body));
        }
        assert_eq!(Body::from_code(499), None);
        assert_eq!(Observer::SolarSystemBarycenter.code(), 0);
        assert_eq!(Observer::Body(Body::Moon).code(), 301);
    }

    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<Engine>();
        }
    };
}
