pub mod deploy;
pub mod error;
pub mod market;
pub mod netenv;
pub mod rpc;
pub mod telemetry;
pub mod wad;
