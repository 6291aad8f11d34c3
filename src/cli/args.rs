use clap::Parser;
use std::env;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Server-rendered product catalog admin",
    long_about = "A small web admin that registers, searches, edits and removes products, \
                  persisting rows in SQLite and uploaded images on disk."
)]
pub struct Cli {
    #[arg(
        long,
        env = "PRODUTOS_LISTEN",
        default_value = "127.0.0.1:3000",
        value_name = "ADDR",
        help = "HTTP listen address (host:port)"
    )]
    pub listen: std::net::SocketAddr,

    #[arg(
        long,
        env = "PRODUTOS_DATA_DIR",
        default_value = ".produtos/",
        value_name = "DIR",
        help = "Directory to store persistent data (SQLite database)"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "PRODUTOS_PUBLIC_DIR",
        default_value = "public",
        value_name = "DIR",
        help = "Static assets directory; uploads live under images/uploads"
    )]
    pub public_dir: String,

    #[arg(
        long,
        env = "PRODUTOS_TEMPLATES_DIR",
        default_value = "templates",
        value_name = "DIR",
        help = "Handlebars templates directory"
    )]
    pub templates_dir: String,

    #[arg(
        long = "log-file",
        env = "PRODUTOS_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
