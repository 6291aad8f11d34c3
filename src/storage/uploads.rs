use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, Rng};

const NAME_TOKEN_LEN: usize = 12;
const MAX_EXT_LEN: usize = 8;

#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    // Client names never land on disk verbatim; only the extension survives.
    pub fn assign_name(&self, client_name: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NAME_TOKEN_LEN)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();

        let ext: String = client_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .take(MAX_EXT_LEN)
            .collect();

        if ext.is_empty() {
            format!("up{token}")
        } else {
            format!("up{token}.{ext}")
        }
    }

    pub fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(filename), bytes)
    }

    pub fn delete(&self, filename: &str) -> io::Result<()> {
        if !is_plain_name(filename) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing upload name {filename:?}"),
            ));
        }
        fs::remove_file(self.dir.join(filename))
    }
}

// The delete route still takes a name from the URL; anything that could
// escape the uploads directory is rejected here.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
