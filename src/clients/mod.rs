pub mod list_client;
pub mod portal;

pub use list_client::{ListClient, Session};
pub use portal::{PortalApi, TestRun};
