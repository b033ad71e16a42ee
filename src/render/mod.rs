//! Shadow compositing: backend seam, matte cache, canvas interface and the compositor itself.

/// Backend trait, settings and construction.
pub mod backend;
/// Single-slot matte cache.
pub mod cache;
/// Canvas and host-container interfaces, plus a CPU canvas.
pub mod canvas;
/// The shadow state machine.
pub mod compositor;
/// CPU backend implementation.
pub mod cpu;
