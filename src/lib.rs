pub mod config;
pub mod context;
pub mod domain;
pub mod emit;
pub mod error;
pub mod gene;
pub mod hits;
pub mod output;
pub mod pipeline;
pub mod publication;
pub mod resolver;
pub mod screen;
pub mod sink;
pub mod store;
pub mod tsv;
pub mod validate;
