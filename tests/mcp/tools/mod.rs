mod annotate;
mod config;
