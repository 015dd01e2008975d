// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce valid stage order at compile time.

mod sealed {
    pub trait Sealed {}
}

/// States a pipeline may end in. Only terminal states can `finish()`.
pub trait Terminal: sealed::Sealed {}

/// Initial state: context resolved, nothing run yet.
/// Available actions: `build_image()`, `apply()`, `destroy()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved;

/// Image built (and pushed when enabled).
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageBuilt;

/// Manifest applied to the cluster.
/// Available actions: `wait_ready()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Applied;

/// Pods matching the identifier are ready.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// Manifest deleted from the cluster.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct TornDown;

impl sealed::Sealed for ImageBuilt {}
impl sealed::Sealed for Ready {}
impl sealed::Sealed for TornDown {}

impl Terminal for ImageBuilt {}
impl Terminal for Ready {}
impl Terminal for TornDown {}
