pub mod config;
pub mod logging;

pub mod agent;
pub mod clock;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod filename;
pub mod interaction;
pub mod messaging;
pub mod page;
pub mod presentation;
pub mod resolve;
pub mod scanner;
