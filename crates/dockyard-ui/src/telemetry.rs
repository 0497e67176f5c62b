//! Per-item resource rings fed by the backend's sample stream.

use std::str::FromStr;

use dockyard_core::alloc::{HashMap, HashSet};
use dockyard_core::profiling::profile_function;

use crate::config::SmoothingConfig;
use crate::error::{DockError, DockResult};
use crate::item::ItemId;
use crate::smoother::ResourceSmoother;

/// Metrics shown as rings around a dock icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// System memory used by the app, in percent.
    Ram,
    /// GPU memory used by the app, in percent.
    Gpu,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Ram => "ram",
            Metric::Gpu => "gpu",
        }
    }
}

impl FromStr for Metric {
    type Err = DockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ram" | "memory" | "mem" => Ok(Metric::Ram),
            "gpu" | "vram" => Ok(Metric::Gpu),
            _ => Err(DockError::UnknownMetric(s.to_string())),
        }
    }
}

/// One raw sample from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSample {
    pub item_id: ItemId,
    pub metric: String,
    pub value: f32,
    pub timestamp_ms: f64,
}

impl ResourceSample {
    pub fn new(
        item_id: impl Into<ItemId>,
        metric: impl Into<String>,
        value: f32,
        timestamp_ms: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            metric: metric.into(),
            value,
            timestamp_ms,
        }
    }
}

/// Smoothed ring values for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingValues {
    pub ram: f32,
    pub gpu: f32,
}

/// The RAM and GPU smoothers behind one icon.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRings {
    ram: ResourceSmoother,
    gpu: ResourceSmoother,
}

impl UsageRings {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            ram: ResourceSmoother::from_config(config),
            gpu: ResourceSmoother::from_config(config),
        }
    }

    pub fn smoother(&self, metric: Metric) -> &ResourceSmoother {
        match metric {
            Metric::Ram => &self.ram,
            Metric::Gpu => &self.gpu,
        }
    }

    fn smoother_mut(&mut self, metric: Metric) -> &mut ResourceSmoother {
        match metric {
            Metric::Ram => &mut self.ram,
            Metric::Gpu => &mut self.gpu,
        }
    }

    /// Feed a sample into the matching ring.
    pub fn observe(&mut self, metric: Metric, value: f32, now_ms: f64) {
        self.smoother_mut(metric).observe(value, now_ms);
    }

    /// Ring values at `now_ms`.
    pub fn sample(&mut self, now_ms: f64) -> RingValues {
        RingValues {
            ram: self.ram.sample(now_ms),
            gpu: self.gpu.sample(now_ms),
        }
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.ram.is_settled(now_ms) && self.gpu.is_settled(now_ms)
    }
}

/// Routes the sample stream to per-item rings.
#[derive(Debug, Clone, Default)]
pub struct TelemetryBoard {
    config: SmoothingConfig,
    rings: HashMap<ItemId, UsageRings>,
}

impl TelemetryBoard {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            rings: HashMap::new(),
        }
    }

    /// Feed one raw sample. Rings are created on an item's first sample.
    pub fn ingest(&mut self, sample: &ResourceSample) -> DockResult<()> {
        let metric: Metric = sample.metric.parse()?;
        let config = self.config;
        self.rings
            .entry(sample.item_id.clone())
            .or_insert_with(|| UsageRings::new(&config))
            .observe(metric, sample.value, sample.timestamp_ms);
        Ok(())
    }

    /// Feed a batch, skipping (and logging) samples with unknown metrics.
    pub fn ingest_all<'a>(&mut self, samples: impl IntoIterator<Item = &'a ResourceSample>) {
        for sample in samples {
            if let Err(e) = self.ingest(sample) {
                tracing::debug!("Skipping sample for {}: {}", sample.item_id, e);
            }
        }
    }

    pub fn rings(&self, id: &ItemId) -> Option<&UsageRings> {
        self.rings.get(id)
    }

    /// Ring values for one item, zero if it never reported.
    pub fn sample(&mut self, id: &ItemId, now_ms: f64) -> RingValues {
        self.rings
            .get_mut(id)
            .map(|rings| rings.sample(now_ms))
            .unwrap_or_default()
    }

    /// Ring values for every item that has reported.
    pub fn sample_all(&mut self, now_ms: f64) -> Vec<(ItemId, RingValues)> {
        profile_function!();
        self.rings
            .iter_mut()
            .map(|(id, rings)| (id.clone(), rings.sample(now_ms)))
            .collect()
    }

    /// Whether any ring is still moving at `now_ms`.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.rings.values().any(|rings| !rings.is_settled(now_ms))
    }

    /// Drop rings for items no longer in the dock.
    pub fn retain_items<'a>(&mut self, ids: impl IntoIterator<Item = &'a ItemId>) {
        let keep: HashSet<&ItemId> = ids.into_iter().collect();
        self.rings.retain(|id, _| keep.contains(id));
    }

    pub fn forget(&mut self, id: &ItemId) {
        self.rings.remove(id);
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}
