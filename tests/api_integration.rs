//! Integration tests for the classify HTTP API.
//!
//! Each test spins up an Axum server on a random port and talks to it with
//! reqwest multipart requests, exercising the real wire contract.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::net::TcpListener;

use inbox_classifier::api::{AppState, EMPTY_CONTENT_REPLY, routes};
use inbox_classifier::classifier::Classifier;
use inbox_classifier::config::TrainConfig;
use inbox_classifier::training;

const SAMPLES_CSV: &str = "text,label
Favor verificar o status do protocolo 4521,Produtivo
Segue anexo o boleto para pagamento,Produtivo
Preciso de suporte com erro no sistema,Produtivo
Solicito atualização do chamado aberto ontem,Produtivo
Poderia enviar a fatura de março?,Produtivo
Não consigo acessar minha conta desde ontem,Produtivo
Muito obrigado pela ajuda de sempre,Improdutivo
Feliz natal a toda a equipe,Improdutivo
Bom dia a todos e ótima semana,Improdutivo
Parabéns pelo excelente trabalho,Improdutivo
Agradeço a atenção de todos,Improdutivo
Abraços e boas festas,Improdutivo
";

/// Start an Axum server on a random port and return its base URL.
async fn start_server(model_path: &Path, max_upload_bytes: usize) -> String {
    let classifier = Arc::new(Classifier::new(model_path.to_path_buf()));
    let app = routes(AppState {
        classifier,
        max_upload_bytes,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://127.0.0.1:{port}")
}

async fn post_form(base: &str, form: Form) -> (reqwest::StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/classify"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn file_part(name: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec()).file_name(name.to_string())
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 1024).await;

    let json: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn text_without_model_uses_heuristics() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 1024).await;

    let form = Form::new().text("texto", "Favor verificar o status do protocolo 4521");
    let (status, json) = post_form(&base, form).await;

    assert_eq!(status, 200);
    assert_eq!(json["categoria"], "Produtivo");
    assert_eq!(json["origem"], "heuristica");
    let confidence = json["confianca"].as_f64().unwrap();
    assert!((0.5..=0.99).contains(&confidence));
}

#[tokio::test]
async fn txt_upload_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 1024).await;

    let form = Form::new().part(
        "arquivo",
        file_part("mensagem.txt", "Muito obrigado, feliz natal!".as_bytes()),
    );
    let (status, json) = post_form(&base, form).await;

    assert_eq!(status, 200);
    assert_eq!(json["categoria"], "Improdutivo");
}

#[tokio::test]
async fn eml_upload_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 4096).await;

    let raw = b"From: cliente@example.com\r\n\
Subject: Fatura\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Segue anexo o boleto, favor confirmar o pagamento.\r\n";
    let form = Form::new().part("arquivo", file_part("msg.eml", raw));
    let (status, json) = post_form(&base, form).await;

    assert_eq!(status, 200);
    assert_eq!(json["categoria"], "Produtivo");
}

#[tokio::test]
async fn unsupported_upload_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 1024).await;

    let form = Form::new().part("arquivo", file_part("foto.png", b"\x89PNG"));
    let (status, json) = post_form(&base, form).await;

    assert_eq!(status, 400);
    assert_eq!(
        json["detail"],
        "Tipo de arquivo não suportado. Use .txt, .pdf ou .eml."
    );
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 100).await;

    let form = Form::new().part("arquivo", file_part("grande.txt", &[b'a'; 101]));
    let (status, _) = post_form(&base, form).await;

    assert_eq!(status, 413);
}

#[tokio::test]
async fn empty_upload_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 100).await;

    let form = Form::new().part("arquivo", file_part("vazio.txt", b""));
    let (status, json) = post_form(&base, form).await;

    assert_eq!(status, 400);
    assert_eq!(json["detail"], "Arquivo vazio.");
}

#[tokio::test]
async fn missing_content_gets_fixed_reply() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_server(&dir.path().join("model.json"), 100).await;

    let (status, json) = post_form(&base, Form::new().text("texto", "")).await;

    assert_eq!(status, 200);
    assert_eq!(json["categoria"], "Improdutivo");
    assert_eq!(json["confianca"], 0.5);
    assert_eq!(json["resposta_sugerida"], EMPTY_CONTENT_REPLY);
    assert_eq!(json["origem"], "heuristica");
}

#[tokio::test]
async fn trained_model_is_used_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join("samples.csv");
    let model_path = dir.path().join("model.json");
    std::fs::write(&dataset_path, SAMPLES_CSV).unwrap();

    let config = TrainConfig {
        dataset_path,
        model_path: model_path.clone(),
        ..TrainConfig::default()
    };
    training::train(&config).unwrap();

    let base = start_server(&model_path, 1024).await;

    let form = Form::new().text("texto", "Preciso de suporte com o boleto do protocolo 99");
    let (status, json) = post_form(&base, form).await;
    assert_eq!(status, 200);
    assert_eq!(json["origem"], "modelo");
    assert_eq!(json["categoria"], "Produtivo");
    let confidence = json["confianca"].as_f64().unwrap();
    assert!((0.6..=0.99).contains(&confidence));

    let diag: Value = reqwest::get(format!("{base}/config"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(diag["model_loaded"], true);
}
