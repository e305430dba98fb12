pub mod breadth_service;

pub use breadth_service::BreadthService;
