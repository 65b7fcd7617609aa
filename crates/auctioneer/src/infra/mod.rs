pub mod config;
pub mod observe;
pub mod sink;
pub mod time;

pub use {config::Config, sink::MessageSink};
