pub mod fake_service;
pub mod harness;
