use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Warden - out-of-band resource lifecycle service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Run the invocation API server
    Serve {
        /// API port (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one database lifecycle event from a JSON file and exit
    Invoke {
        /// Path to the lifecycle event JSON
        event_file: PathBuf,
    },

    /// Resolve a managed address list by name and print it
    Lookup {
        /// Address list name
        name: String,
    },
}
