pub mod asset;
pub mod cache;
pub mod commands;
pub mod config;
pub mod environment;
pub mod fallback;
pub mod format;
pub mod github;
pub mod http;
pub mod offer;
pub mod recommend;
pub mod release;
pub mod runtime;
