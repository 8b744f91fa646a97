//! `.eml` (RFC 5322 message) → body text.

use mail_parser::{MessageParser, PartType};
use tracing::debug;

use super::html::strip_html;

/// Body text of a raw email.
///
/// Prefers the first `text/plain` part, then the first `text/html` part with
/// tags stripped. Returns an empty string when nothing readable is found.
pub fn extract_text_from_eml(raw: &[u8]) -> String {
    let Some(message) = MessageParser::default().parse(raw) else {
        debug!(bytes = raw.len(), "EML payload could not be parsed");
        return String::new();
    };

    let plain = message.parts.iter().find_map(|part| match &part.body {
        PartType::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    });
    if let Some(text) = plain {
        return text;
    }

    message
        .parts
        .iter()
        .find_map(|part| match &part.body {
            PartType::Html(html) => Some(strip_html(html)),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_part_plain_text() {
        let raw = b"From: alice@example.com\r\n\
To: suporte@example.com\r\n\
Subject: Protocolo 123\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Favor verificar o status do protocolo 123.\r\n";
        assert_eq!(
            extract_text_from_eml(raw),
            "Favor verificar o status do protocolo 123."
        );
    }

    #[test]
    fn multipart_prefers_plain_text() {
        let raw = b"From: alice@example.com\r\n\
Subject: Boleto\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/alternative; boundary=\"sep\"\r\n\
\r\n\
--sep\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<p>Versao <b>HTML</b></p>\r\n\
--sep\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Versao texto\r\n\
--sep--\r\n";
        assert_eq!(extract_text_from_eml(raw), "Versao texto");
    }

    #[test]
    fn html_only_is_stripped() {
        let raw = b"From: bob@example.com\r\n\
Subject: Obrigado\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<html><body><p>Muito obrigado!</p></body></html>\r\n";
        assert_eq!(extract_text_from_eml(raw), "Muito obrigado!");
    }

    #[test]
    fn empty_payload_yields_empty_text() {
        assert_eq!(extract_text_from_eml(b""), "");
    }
}
