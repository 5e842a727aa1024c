mod config;
mod draw_flow;
mod speech;
