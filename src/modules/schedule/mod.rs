pub mod service;

pub use service::ScheduleService;
