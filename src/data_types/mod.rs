pub mod filter;
pub mod plot_configs;
pub mod range;
pub mod sample;
pub mod state;

pub use filter::*;
pub use plot_configs::*;
pub use range::*;
pub use sample::*;
pub use state::*;
