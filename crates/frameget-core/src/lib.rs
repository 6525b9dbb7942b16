pub mod config;
pub mod logging;

pub mod acquire;
pub mod batch;
pub mod candidates;
pub mod catalog;
pub mod decompress;
pub mod fetch;
pub mod key;
pub mod storage;
pub mod verify;

pub use acquire::{Acquirer, AcquirerConfig, Acquisition, DefaultAcquirer};
pub use key::ObservationKey;
