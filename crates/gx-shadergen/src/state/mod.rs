pub mod config;
pub mod topology;
pub mod xf;

pub use config::{BackendInfo, ConfigError, StereoMode, VideoConfig};
pub use topology::PrimitiveType;
pub use xf::{XfState, MAX_TEX_GENS};
