//! `medialib_core`: the library engine. Wires the Storage Engine, Device
//! Registry, Filesystem Abstraction, Discoverer, Parser Pipeline, Cache
//! Manager and Query Layer behind the single [`facade::MediaLibrary`] a
//! host application drives.

pub mod cache;
pub mod callbacks;
pub mod config;
pub mod device_registry;
pub mod discoverer;
pub mod error;
pub mod facade;
pub mod fs;
pub mod parser;
pub mod query;
pub mod storage;
pub mod thumbnail;

pub use callbacks::{Callbacks, DiscoveryPhase, EntityKind, NullCallbacks};
pub use config::Config;
pub use error::{Error, Result};
pub use facade::MediaLibrary;
pub use storage::OpenOutcome;
