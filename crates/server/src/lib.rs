pub mod api;
pub mod metrics;
pub mod startup;
pub mod state;
