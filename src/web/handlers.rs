use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::storage::ProductStore;

use super::{
    models::{
        AtualizarForm, CadastroContext, CadastroForm, EditarContext, FormError, PageContext,
        PesquisaContext, PesquisaQuery,
    },
    views::Views,
    AppState,
};

pub async fn index<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    render(
        &state.views,
        "index",
        &PageContext {
            title: "Home",
            cabecalho: "Página Inicial",
        },
    )
}

pub async fn sobre<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    render(
        &state.views,
        "sobre",
        &PageContext {
            title: "Sobre",
            cabecalho: "Mais Informações",
        },
    )
}

pub async fn blog<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    render(
        &state.views,
        "blog",
        &PageContext {
            title: "Blog",
            cabecalho: "Blog do Evandro.",
        },
    )
}

pub async fn cadastro<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    let produtos = match state.store.list() {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Failed to list products: {err:?}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao carregar os produtos.",
            )
                .into_response();
        }
    };

    render(
        &state.views,
        "cadastro",
        &CadastroContext {
            title: "Cadastro",
            cabecalho: "Cadastrar Informações",
            produtos,
        },
    )
}

pub async fn pesquisa<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<PesquisaQuery>,
) -> Response {
    let termo = query.nome.unwrap_or_default();
    let produtos = match state.store.search(&termo) {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Failed to search products for {termo:?}: {err:?}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao pesquisar os produtos.",
            )
                .into_response();
        }
    };

    render(
        &state.views,
        "pesquisa",
        &PesquisaContext {
            title: "Pesquisa",
            cabecalho: "Pesquisar Produtos",
            termo,
            produtos,
        },
    )
}

pub async fn editar<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(err) => {
            log::warn!("Invalid product id {id:?}: {err}");
            return (StatusCode::BAD_REQUEST, "Parâmetros inválidos.").into_response();
        }
    };

    let produto = match state.store.get(id) {
        Ok(Some(produto)) => produto,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Produto não encontrado.").into_response();
        }
        Err(err) => {
            log::error!("Failed to load product {id}: {err:?}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao carregar o produto.",
            )
                .into_response();
        }
    };

    render(
        &state.views,
        "editar",
        &EditarContext {
            title: "Editar",
            cabecalho: "Editar Produto",
            produto,
        },
    )
}

pub async fn cadastrar<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    multipart: Multipart,
) -> Response {
    let form = match CadastroForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(FormError::MissingFile(_)) => {
            log::warn!("Product registration without an attached file");
            return (StatusCode::BAD_REQUEST, "Nenhum arquivo foi enviado.").into_response();
        }
        Err(err) => {
            log::warn!("Rejected product registration form: {err}");
            return (StatusCode::BAD_REQUEST, "Parâmetros inválidos.").into_response();
        }
    };

    let imagem = state.uploads.assign_name(&form.imagem.client_name);

    let id = match state.store.create(&form.nome, &form.valor, &imagem) {
        Ok(id) => id,
        Err(err) => {
            log::error!("Failed to insert product {:?}: {err:?}", form.nome);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao cadastrar o produto.",
            )
                .into_response();
        }
    };

    if let Err(err) = state.uploads.save(&imagem, &form.imagem.bytes) {
        log::error!("Failed to save image {imagem} for product {id}: {err}");
        // compensate so the row never points at a file that was never written
        if let Err(err) = state.store.delete(id) {
            log::error!("Failed to roll back product {id} after image failure: {err:?}");
        }
        return (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao salvar a imagem.").into_response();
    }

    log::info!("Registered product {id} ({:?}, image {imagem})", form.nome);
    Redirect::to("/cadastro").into_response()
}

pub async fn atualizar<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    multipart: Multipart,
) -> Response {
    let form = match AtualizarForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Rejected product update form: {err}");
            return (StatusCode::BAD_REQUEST, "Parâmetros inválidos.").into_response();
        }
    };

    let imagem = match &form.imagem {
        Some(file) => {
            let imagem = state.uploads.assign_name(&file.client_name);
            if let Err(err) = state.uploads.save(&imagem, &file.bytes) {
                log::error!("Failed to save image {imagem} for product {}: {err}", form.id);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao salvar a imagem.")
                    .into_response();
            }
            Some(imagem)
        }
        None => None,
    };

    match state.store.update(form.id, &form.nome, &form.valor, imagem.as_deref()) {
        Ok(0) => {
            // no row took ownership of the freshly saved file
            if let Some(imagem) = &imagem {
                if let Err(err) = state.uploads.delete(imagem) {
                    log::error!("Failed to discard unused image {imagem}: {err}");
                }
            }
            (StatusCode::NOT_FOUND, "Produto não encontrado.").into_response()
        }
        Ok(_) => {
            log::info!("Updated product {}", form.id);
            Redirect::to("/cadastro").into_response()
        }
        Err(err) => {
            log::error!("Failed to update product {}: {err:?}", form.id);
            if let Some(imagem) = &imagem {
                if let Err(err) = state.uploads.delete(imagem) {
                    log::error!("Failed to discard unused image {imagem}: {err}");
                }
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao atualizar o produto.",
            )
                .into_response()
        }
    }
}

pub async fn remover<S: ProductStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path((id, imagem)): Path<(String, String)>,
) -> Response {
    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(err) => {
            log::warn!("Invalid product id {id:?}: {err}");
            return (StatusCode::BAD_REQUEST, "Parâmetros inválidos.").into_response();
        }
    };
    if imagem.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Parâmetros inválidos.").into_response();
    }

    if let Err(err) = state.store.delete(id) {
        log::error!("Failed to delete product {id}: {err:?}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Erro ao remover o produto.",
        )
            .into_response();
    }

    // the row is already gone at this point; a file failure leaves it gone
    if let Err(err) = state.uploads.delete(&imagem) {
        log::error!("Failed to delete image {imagem} of product {id}: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Erro ao remover a imagem do servidor.",
        )
            .into_response();
    }

    log::info!("Removed product {id} and image {imagem}");
    Redirect::to("/cadastro").into_response()
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Página não encontrada.")
}

fn render<T: Serialize>(views: &Views, name: &str, data: &T) -> Response {
    match views.render(name, data) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            log::error!("Failed to render view {name}: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao renderizar a página.",
            )
                .into_response()
        }
    }
}
