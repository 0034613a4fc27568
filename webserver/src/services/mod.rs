//! Service implementations

pub mod copy_service;

pub use copy_service::RealCopyService;
