pub mod assistant;
pub mod dashboard;

pub use assistant::AssistantScreen;
pub use dashboard::DashboardScreen;
