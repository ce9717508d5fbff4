#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network client and file download for apack
//!
//! Every failure here is terminal: the pipeline never retries, so the
//! client reports the first error it sees and the orchestrator aborts.

mod client;
mod download;

pub use client::{NetClient, NetConfig};
pub use download::{Download, DownloadResult};
