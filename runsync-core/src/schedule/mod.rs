mod controller;
mod poller;
mod state;
mod sync;

pub use controller::CurrentRunController;
pub use poller::PollerHandle;
pub use poller::SchedulePoller;
pub use state::ScheduleState;
pub use sync::ScheduleSync;
