//! Controller layer: page routing and per-frame event collection.

pub mod events;
pub mod navigation;
