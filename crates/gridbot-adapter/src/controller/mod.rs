//! Inbound Adapters - How clients reach the game service

pub mod http;
