// Application layer - Use cases over fleet snapshots
pub mod dashboard_service;
pub mod presenter;
pub mod snapshot_source;
pub mod streaming_service;
pub mod truck_service;
