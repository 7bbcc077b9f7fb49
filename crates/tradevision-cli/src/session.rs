//! Dashboard session state.
//!
//! The session owns the selected symbol and the snapshot currently on screen.
//! Every update builds a fresh [`ChartSnapshot`] and swaps the `Arc`, so a
//! reader holding the previous snapshot keeps a consistent view.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};
use tradevision_core::{
    append_live_bar, CacheMode, ChartSnapshot, CoreError, IndicatorParams, Interval, SeriesCache,
    SeriesRequest, SeriesSource, SnapshotKey, Symbol, UtcDateTime,
};

use crate::cli::{GenerationArgs, WindowArgs};
use crate::error::CliError;

/// Generation and indicator settings applied to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub point_count: usize,
    pub seed: Option<u64>,
    pub interval: Interval,
    pub end: Option<UtcDateTime>,
    pub params: IndicatorParams,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            point_count: 200,
            seed: None,
            interval: Interval::default(),
            end: None,
            params: IndicatorParams::default(),
        }
    }
}

impl DashboardSettings {
    pub fn from_args(
        generation: &GenerationArgs,
        windows: Option<&WindowArgs>,
    ) -> Result<Self, CliError> {
        let params = match windows {
            Some(windows) => IndicatorParams::new(windows.short, windows.long, windows.rsi)?,
            None => IndicatorParams::default(),
        };

        Ok(Self {
            point_count: generation.points,
            seed: generation.seed,
            interval: Interval::from_str(&generation.interval)?,
            end: generation.end.as_deref().map(UtcDateTime::parse).transpose()?,
            params,
        })
    }

    fn request(&self, symbol: &Symbol) -> Result<SeriesRequest, CoreError> {
        let mut request = SeriesRequest::new(symbol.clone(), self.point_count)?
            .with_interval(self.interval);
        request.seed = self.seed;
        request.end = self.end;
        Ok(request)
    }

    fn key(&self, symbol: &Symbol) -> Result<SnapshotKey, CoreError> {
        Ok(SnapshotKey {
            symbol: symbol.clone(),
            point_count: self.point_count,
            seed: self.request(symbol)?.resolved_seed(),
            interval: self.interval,
            params: self.params,
        })
    }
}

/// One dashboard: a source, a cache and the snapshot being displayed.
pub struct Dashboard<S> {
    source: S,
    cache: SeriesCache,
    settings: DashboardSettings,
    current: Arc<ChartSnapshot>,
    cache_hit: bool,
    ticks: u64,
}

impl<S: SeriesSource> Dashboard<S> {
    /// Open the dashboard on `symbol`.
    pub async fn open(
        source: S,
        cache: SeriesCache,
        settings: DashboardSettings,
        symbol: Symbol,
    ) -> Result<Self, CoreError> {
        let (current, cache_hit) =
            load(&source, &cache, &settings, &symbol, CacheMode::Use).await?;
        info!(symbol = %symbol, source = source.name(), cache_hit, "dashboard opened");
        Ok(Self {
            source,
            cache,
            settings,
            current,
            cache_hit,
            ticks: 0,
        })
    }

    pub fn current(&self) -> Arc<ChartSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn symbol(&self) -> &Symbol {
        self.current.series.symbol()
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Seed behind the current series: explicit, or derived from the symbol.
    pub fn seed(&self) -> u64 {
        self.settings.seed.unwrap_or_else(|| self.symbol().seed())
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Whether the current snapshot was served from the cache.
    pub fn cache_hit(&self) -> bool {
        self.cache_hit
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Replace the explicit seed used for the next load.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.settings.seed = seed;
    }

    /// Switch to another symbol, dropping cached entries of the old one.
    pub async fn select(&mut self, symbol: Symbol) -> Result<Arc<ChartSnapshot>, CoreError> {
        let previous = self.symbol().clone();
        if previous != symbol {
            let removed = self.cache.invalidate(&previous).await;
            debug!(from = %previous, to = %symbol, removed, "symbol changed");
        }

        let (snapshot, cache_hit) =
            load(&self.source, &self.cache, &self.settings, &symbol, CacheMode::Use).await?;
        self.replace(snapshot, cache_hit);
        self.ticks = 0;
        Ok(self.current())
    }

    /// Regenerate the current symbol from scratch.
    pub async fn refresh(&mut self) -> Result<Arc<ChartSnapshot>, CoreError> {
        let symbol = self.symbol().clone();
        let (snapshot, _) =
            load(&self.source, &self.cache, &self.settings, &symbol, CacheMode::Refresh).await?;
        self.replace(snapshot, false);
        self.ticks = 0;
        Ok(self.current())
    }

    /// Append one live bar, keeping at most `window` bars.
    ///
    /// The cached snapshot for this symbol no longer matches what is on
    /// screen, so it is invalidated.
    pub async fn tick(&mut self, window: usize) -> Result<Arc<ChartSnapshot>, CoreError> {
        let next_tick = self.ticks + 1;
        let seed = live_seed(self.seed(), next_tick);
        let series = &self.current.series;

        let bar = append_live_bar(series, seed)?;
        let advanced = series.advance(bar, window)?;
        let snapshot = ChartSnapshot::build(advanced, self.settings.params)?;

        self.cache.invalidate(series.symbol()).await;
        self.replace(Arc::new(snapshot), false);
        self.ticks = next_tick;
        Ok(self.current())
    }

    fn replace(&mut self, snapshot: Arc<ChartSnapshot>, cache_hit: bool) {
        self.current = snapshot;
        self.cache_hit = cache_hit;
    }
}

async fn load<S: SeriesSource>(
    source: &S,
    cache: &SeriesCache,
    settings: &DashboardSettings,
    symbol: &Symbol,
    mode: CacheMode,
) -> Result<(Arc<ChartSnapshot>, bool), CoreError> {
    let request = settings.request(symbol)?;
    let key = settings.key(symbol)?;
    cache
        .get_or_build(key, mode, |key| {
            let series = source.series(&request)?;
            ChartSnapshot::build(series, key.params)
        })
        .await
}

/// Per-tick seed so consecutive ticks draw independent returns while a
/// replay with the same base seed reproduces the same bars.
pub fn live_seed(base_seed: u64, tick: u64) -> u64 {
    base_seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
