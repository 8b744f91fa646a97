//! Canned replies, one per category.

use crate::classifier::types::Category;

/// Acknowledges the request, asks for protocol/attachments, promises a same-day answer.
pub const PRODUCTIVE_REPLY: &str = "Olá! Recebemos sua solicitação e já estamos analisando. \
Se possível, informe o número do protocolo e anexos relevantes. \
Daremos retorno até o fim do dia útil.";

/// Thanks the sender and invites details if real support is needed.
pub const COURTESY_REPLY: &str = "Olá! Agradecemos a mensagem. Caso precise de suporte ou acompanhamento \
de alguma requisição, envie os detalhes para acelerarmos o atendimento.";

/// Suggested reply for a category.
pub fn reply_for(category: Category) -> &'static str {
    match category {
        Category::Produtivo => PRODUCTIVE_REPLY,
        Category::Improdutivo => COURTESY_REPLY,
    }
}
