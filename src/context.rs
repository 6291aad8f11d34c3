use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let config = Configuration {
            listen: cli.listen,
            data_dir: cli.data_dir.clone().into(),
            public_dir: cli.public_dir.clone().into(),
            templates_dir: cli.templates_dir.clone().into(),
            log_file: cli.log_file.clone().map(Into::into),
            reset: cli.reset,
        };
        Self { config }
    }
}
