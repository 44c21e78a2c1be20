// Domain layer - Fleet model, classification and snapshot generation
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod snapshot;
pub mod truck;
