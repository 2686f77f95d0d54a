pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod rig;
pub mod sampler;
pub mod scheduler;
pub mod session;
pub mod smoothing;

pub use camera::*;
pub use config::*;
pub use error::*;
pub use rig::*;
pub use sampler::*;
pub use scheduler::*;
pub use session::*;
pub use smoothing::*;
