//! Chat-completion client and the wire types it speaks.

pub mod client;
mod request;
mod response;

pub use client::CompletionClient;
