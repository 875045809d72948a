pub mod stride;

pub use stride::{decimate, decimate_into, stride_for};
