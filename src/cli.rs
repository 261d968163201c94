use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use clap::Parser;

pub const DEFAULT_PORT: u16 = 5555;

/// Runtime settings. Every flag can also come from the environment or `.env`.
#[derive(Parser, Debug, Clone)]
#[command(name = "reservation-desk", about = "Reservation booking API backed by MongoDB")]
pub struct Config {
    /// MongoDB connection string; without it the API runs disconnected
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,

    /// Directory whose files are served verbatim
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_uri: None,
            port: DEFAULT_PORT,
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            public_dir: PathBuf::from("public"),
        }
    }
}
