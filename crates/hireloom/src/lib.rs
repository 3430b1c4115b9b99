pub mod client;

pub use client::{HireloomClient, HireloomError};
