use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::storage::Product;

#[derive(Deserialize)]
pub struct PesquisaQuery {
    pub nome: Option<String>,
}

#[derive(Serialize)]
pub struct PageContext {
    pub title: &'static str,
    pub cabecalho: &'static str,
}

#[derive(Serialize)]
pub struct CadastroContext {
    pub title: &'static str,
    pub cabecalho: &'static str,
    pub produtos: Vec<Product>,
}

#[derive(Serialize)]
pub struct PesquisaContext {
    pub title: &'static str,
    pub cabecalho: &'static str,
    pub termo: String,
    pub produtos: Vec<Product>,
}

#[derive(Serialize)]
pub struct EditarContext {
    pub title: &'static str,
    pub cabecalho: &'static str,
    pub produto: Product,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("missing uploaded file `{0}`")]
    MissingFile(&'static str),
    #[error("invalid field `{0}`")]
    InvalidField(&'static str),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

pub struct UploadedFile {
    pub client_name: String,
    pub bytes: Bytes,
}

pub struct CadastroForm {
    pub nome: String,
    pub valor: String,
    pub imagem: UploadedFile,
}

pub struct AtualizarForm {
    pub id: i64,
    pub nome: String,
    pub valor: String,
    pub imagem: Option<UploadedFile>,
}

impl CadastroForm {
    pub async fn from_multipart(multipart: Multipart) -> Result<Self, FormError> {
        let mut raw = RawForm::read(multipart).await?;
        Ok(Self {
            nome: raw.take_text("nome")?,
            valor: raw.take_text("valor")?,
            imagem: raw
                .take_file("imagem")
                .ok_or(FormError::MissingFile("imagem"))?,
        })
    }
}

impl AtualizarForm {
    pub async fn from_multipart(multipart: Multipart) -> Result<Self, FormError> {
        let mut raw = RawForm::read(multipart).await?;
        let id = raw
            .take_text("id")?
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidField("id"))?;
        Ok(Self {
            id,
            nome: raw.take_text("nome")?,
            valor: raw.take_text("valor")?,
            imagem: raw.take_file("imagem"),
        })
    }
}

#[derive(Default)]
struct RawForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl RawForm {
    async fn read(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                // browsers submit an empty filename for an untouched file input
                Some(client_name) if !client_name.is_empty() => {
                    let bytes = field.bytes().await?;
                    form.files
                        .insert(name, UploadedFile { client_name, bytes });
                }
                _ => {
                    form.texts.insert(name, field.text().await?);
                }
            }
        }
        Ok(form)
    }

    fn take_text(&mut self, name: &'static str) -> Result<String, FormError> {
        self.texts
            .remove(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(FormError::MissingField(name))
    }

    fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
