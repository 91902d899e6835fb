//! Chart loading with an in-flight guard.
//!
//! A load runs parse → process → validate and only then swaps the new chart
//! in. Readers holding the previous `Arc<Chart>` keep it; a failed load leaves
//! the current chart in place.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::chart::Chart;
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::parse::{ChartParser, decode_chart_bytes};
use crate::timing;

/// Owner of the currently loaded chart.
#[derive(Debug, Default)]
pub struct ChartLoader {
    config: ChartConfig,
    current: RwLock<Option<Arc<Chart>>>,
    loading: AtomicBool,
}

/// Clears the loading flag when the load finishes, successful or not.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::AlreadyLoading)?;
        Ok(Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChartLoader {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// The last successfully loaded chart.
    pub fn current(&self) -> Option<Arc<Chart>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn load_str(&self, content: &str) -> Result<Arc<Chart>> {
        let _guard = LoadingGuard::acquire(&self.loading)?;
        self.build_and_swap(content)
    }

    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<Chart>> {
        let _guard = LoadingGuard::acquire(&self.loading)?;
        let content = decode_chart_bytes(bytes)?;
        self.build_and_swap(&content)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Arc<Chart>> {
        let _guard = LoadingGuard::acquire(&self.loading)?;
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let content = decode_chart_bytes(&bytes)?;
        let chart = self.build_and_swap(&content)?;
        info!("Loaded chart from {:?}", path);
        Ok(chart)
    }

    fn build_and_swap(&self, content: &str) -> Result<Arc<Chart>> {
        let chart = match build_chart(content, &self.config) {
            Ok(chart) => Arc::new(chart),
            Err(e) => {
                warn!("Chart load failed, keeping previous chart: {}", e);
                return Err(e);
            }
        };

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&chart));

        info!(
            "Chart ready: {} notes, {} holds, {:.0}ms",
            chart.notes.len(),
            chart.holds.len(),
            chart.duration_ms().unwrap_or_default()
        );
        Ok(chart)
    }
}

/// Parse, process and validate chart text without touching any loader state.
pub fn build_chart(content: &str, config: &ChartConfig) -> Result<Chart> {
    let parsed = ChartParser::parse_str(content)?;
    let chart = timing::process(parsed, config)?;
    timing::validate(&chart, config)?;
    Ok(chart)
}
