use anyhow::Result;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i64,
    pub nome: String,
    pub valor: String,
    pub imagem: String,
}

pub trait ProductStore {
    fn create(&self, nome: &str, valor: &str, imagem: &str) -> Result<i64>;
    fn list(&self) -> Result<Vec<Product>>;
    fn get(&self, id: i64) -> Result<Option<Product>>;
    fn search(&self, nome: &str) -> Result<Vec<Product>>;
    fn update(&self, id: i64, nome: &str, valor: &str, imagem: Option<&str>) -> Result<usize>;
    fn delete(&self, id: i64) -> Result<usize>;
}
