//! Form definitions backing the delivery routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod delivery_types;
pub mod entries;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
///
/// Messages are shown to the user verbatim.
pub enum FormError {
    #[error("Erro de validação: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Adicione pelo menos uma entrega para enviar")]
    NoDeliveries,

    #[error("Informe um valor válido para entregas extras")]
    InvalidExtraValue,

    #[error("Tipo de entrega desconhecido")]
    UnknownDeliveryType,

    #[error("Quantidade inválida")]
    InvalidQuantity,

    #[error("Data inválida")]
    InvalidDate,

    #[error("Nenhum tipo de entrega extra configurado")]
    MissingExtraType,

    #[error("Já existe um tipo de entrega extra")]
    DuplicateExtraType,

    #[error("Nome inválido")]
    InvalidName,

    #[error("Valor inválido")]
    InvalidValue,

    #[error("Formulário inválido")]
    Malformed,
}
