pub mod alerts;
pub mod monitors;
