// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::truck_service::TruckService;

#[derive(Clone)]
pub struct AppState {
    pub truck_service: TruckService,
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
}
