use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Configuration {
    pub listen: SocketAddr,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}

impl Configuration {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("produtos.sqlite")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join("images").join("uploads")
    }
}
