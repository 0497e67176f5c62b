//! Dockyard UI - pointer-driven icon dock engine
//!
//! This crate holds the state of a vertical dock of draggable items:
//! - Slot geometry and insertion hit-testing
//! - A single-drag state machine fed by raw pointer events
//! - Critically damped springs that settle items into their slots
//! - Eased smoothing for per-item resource telemetry rings
//!
//! Rendering is left to the host. Each frame it feeds pointer events, calls
//! [`DockController::tick`], draws [`DockController::visuals`] and drains the
//! emitted [`DockIntent`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use dockyard_ui::{DockConfig, DockController, DockIntent, Item, PointerEvent};
//!
//! let mut dock = DockController::with_items(
//!     DockConfig::default(),
//!     [Item::new("files"), Item::new("terminal").pinned(true)],
//! )
//! .unwrap();
//!
//! // Click the first item.
//! dock.handle_pointer(PointerEvent::down(20.0, 30.0));
//! dock.handle_pointer(PointerEvent::up(20.0, 30.0));
//!
//! // In the frame loop:
//! dock.tick(1.0 / 60.0);
//! for visual in dock.visuals() {
//!     let _ = (visual.position, visual.opacity);
//! }
//!
//! let intents: Vec<DockIntent> = dock.drain_intents().collect();
//! assert_eq!(intents, vec![DockIntent::Select(Some("files".into()))]);
//! ```

pub mod config;
pub mod controller;
pub mod drag;
pub mod easing;
pub mod error;
pub mod event;
pub mod ghost;
pub mod intent;
pub mod item;
pub mod layout;
pub mod smoother;
pub mod spring;
pub mod telemetry;

pub use config::{DockConfig, ShakeConfig, SmoothingConfig, SpringConfig};
pub use easing::EasingFunction;
pub use error::{DockError, DockResult};
pub use ghost::GhostVisual;
pub use item::{Item, ItemId};
pub use layout::{Slot, SlotLayout};
pub use smoother::{MetricDomain, ResourceSmoother};
pub use spring::{SettlingState, Shake, SpringSettler};
pub use telemetry::{Metric, ResourceSample, RingValues, TelemetryBoard, UsageRings};

// Re-export main types
pub use controller::{DockController, ItemVisual};
pub use drag::{ActiveDrag, DragSession};
pub use event::{DockState, PointerEvent, PointerPhase};
pub use intent::{DockIntent, IntentSink};
