use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use toolshelf_telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TOOLSHELF_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "TOOLSHELF_STORAGE";
pub const DATA_FILE_ENV: &str = "TOOLSHELF_DATA_FILE";
pub const CLICK_DEDUP_SECS_ENV: &str = "TOOLSHELF_CLICK_DEDUP_SECS";
pub const ADMIN_GATE_ENV: &str = "TOOLSHELF_ADMIN_GATE";
pub const LOG_FORMAT_ENV: &str = "TOOLSHELF_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "src/data/toolsData.js";
pub const DEFAULT_CLICK_DEDUP_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "file")]
    File,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::File => write!(f, "file"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "toolshelf", about = "Tool directory catalog server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::File
    )]
    pub storage: StorageBackendArg,

    /// Host document holding the record block.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = CLICK_DEDUP_SECS_ENV, default_value_t = DEFAULT_CLICK_DEDUP_SECS)]
    pub click_dedup_secs: u64,

    /// Require the `isAdminLoggedIn=true` cookie on create, update and delete.
    #[arg(long, env = ADMIN_GATE_ENV, default_value_t = false)]
    pub admin_gate: bool,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
