pub mod client;
pub mod model;

pub use client::{HttpRegistry, RegistrySource};
pub use model::{Registry, RegistryRecord, RemoteModEntry};
