// Allocator abstraction and resource-backed storage

pub mod buffer;
pub mod config;
pub mod managed;
pub mod resource;

pub use buffer::ResourceBuffer;
pub use config::ResourceConfig;
pub use managed::ManagedResource;
pub use resource::{default_resource, same_resource, MemoryResource, ResourceHandle};
