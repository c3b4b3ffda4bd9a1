pub mod config;
pub mod constants;
pub mod dock;
pub mod drivers;
pub mod event_loop;
pub mod layout;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
