mod app;
mod audio;
mod config;
mod connection;
mod error;
mod library;
mod playback;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
