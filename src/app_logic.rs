/*
 * This module provides the application logic layer, centered around
 * `ArchiveBrowserLogic`, which dispatches adapter events into the core
 * session and derives the render-ready `ViewModel`.
 * Unit tests for `ArchiveBrowserLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod view_model;


pub use handler::{ArchiveBrowserLogic, BrowserEvent, ClockOperations, SystemClock};
pub use view_model::ViewModel;
