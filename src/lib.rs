//! Traffic-light ("lampu lalu lintas") state timing for common intersection
//! layouts: a static scenario catalog, a pure projection into tables and bar
//! charts, and a terminal front end that draws it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod run;
pub mod ui;

pub use catalog::{lookup, Light, Scenario, ScenarioId, StateRow, Summary};
pub use config::{Config, Mode};
pub use error::{Error, Result};
pub use presenter::{project, BarPalette, Presenter, RenderPlan};
