//! Transport layers for exposing the insights engine

pub mod http;
