use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

const VIEW_NAMES: &[&str] = &["index", "sobre", "blog", "cadastro", "pesquisa", "editar"];

#[derive(Clone, Debug)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut registry = Handlebars::new();
        for name in VIEW_NAMES {
            let path = dir.as_ref().join(format!("{name}.hbs"));
            registry
                .register_template_file(name, &path)
                .with_context(|| format!("registering view {} from {}", name, path.display()))?;
        }
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.registry.render(name, data)?)
    }
}
