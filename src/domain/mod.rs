// Domain layer - Plain data types shared by every other layer
pub mod error;
pub mod frame;
pub mod observation;
pub mod palette;
pub mod snapshot;
