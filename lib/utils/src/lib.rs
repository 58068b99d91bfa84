pub mod constants;
pub mod errors;
pub mod node_utils;
pub mod unpack;
