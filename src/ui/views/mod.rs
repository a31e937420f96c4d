//! The five dashboard tabs. egui is immediate-mode, so only the active tab's
//! `show` runs each frame; every aggregate is computed lazily per tab.

pub mod environment;
pub mod insights;
pub mod overview;
pub mod renewables;
pub mod trends;
