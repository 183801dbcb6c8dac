//! Library exports for dashgate, shared between the application shell and tests.

pub mod bus;
pub mod config;
pub mod gateway;
pub mod guard;
pub mod invite;
pub mod models;
pub mod project;
pub mod session;
pub mod startup;
pub mod state;
pub mod storage;
