//! End-to-end properties of the decision engine, with and without a trained
//! artifact on disk.

use std::path::Path;

use inbox_classifier::classifier::responders::{COURTESY_REPLY, PRODUCTIVE_REPLY};
use inbox_classifier::classifier::{Category, Classifier, Origin};
use inbox_classifier::config::TrainConfig;
use inbox_classifier::ml::TextPipeline;
use inbox_classifier::training;

const MESSAGES: &[&str] = &[
    "Favor verificar o status do protocolo 4521, urgente",
    "Muito obrigado pela atenção, feliz natal!",
    "Bom dia",
    "Segue anexo o contrato revisado",
    "Não consigo acessar o sistema, aparece um erro",
    "Parabéns pelo aniversário 🎉",
    "ok",
    "Poderia enviar a nota fiscal?",
];

fn train_model(dir: &Path) -> std::path::PathBuf {
    let dataset_path = dir.join("samples.csv");
    let model_path = dir.join("artifacts").join("model.json");
    let mut csv = String::from("text,label\n");
    for (text, label) in [
        ("Favor verificar o status do protocolo 4521", "Produtivo"),
        ("Segue anexo o boleto para pagamento", "Produtivo"),
        ("Preciso de suporte com erro no sistema", "Produtivo"),
        ("Solicito atualização do chamado aberto", "Produtivo"),
        ("Poderia enviar a fatura deste mês?", "Produtivo"),
        ("Não consigo acessar minha conta", "Produtivo"),
        ("Muito obrigado pela ajuda", "Improdutivo"),
        ("Feliz natal a toda a equipe", "Improdutivo"),
        ("Bom dia a todos e ótima semana", "Improdutivo"),
        ("Parabéns pelo excelente trabalho", "Improdutivo"),
        ("Agradeço a atenção de todos", "Improdutivo"),
        ("Abraços e boas festas", "Improdutivo"),
    ] {
        csv.push_str(&format!("{text},{label}\n"));
    }
    std::fs::write(&dataset_path, csv).unwrap();

    let outcome = training::train(&TrainConfig {
        dataset_path,
        model_path: model_path.clone(),
        ..TrainConfig::default()
    })
    .unwrap();
    assert_eq!(outcome.rows, 12);
    model_path
}

#[test]
fn without_artifact_every_result_is_heuristic_and_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(dir.path().join("missing.json"));

    for message in MESSAGES {
        let result = classifier.classify(message);
        assert_eq!(result.origin, Origin::Heuristica, "{message}");
        assert!(
            (0.50..=0.99).contains(&result.confidence),
            "{message}: {}",
            result.confidence
        );
    }
    assert!(!classifier.gateway().is_loaded());
}

#[test]
fn with_artifact_every_result_comes_from_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(train_model(dir.path()));

    for message in MESSAGES {
        let result = classifier.classify(message);
        assert_eq!(result.origin, Origin::Modelo, "{message}");
        assert!(
            (0.60..=0.99).contains(&result.confidence),
            "{message}: {}",
            result.confidence
        );
    }
    assert!(classifier.gateway().is_loaded());
}

#[test]
fn reply_always_matches_category() {
    let dir = tempfile::tempdir().unwrap();
    let heuristic = Classifier::new(dir.path().join("missing.json"));
    let hybrid = Classifier::new(train_model(dir.path()));

    for classifier in [&heuristic, &hybrid] {
        for message in MESSAGES {
            let result = classifier.classify(message);
            let expected = match result.category {
                Category::Produtivo => PRODUCTIVE_REPLY,
                Category::Improdutivo => COURTESY_REPLY,
            };
            assert_eq!(result.suggested_reply, expected, "{message}");
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(train_model(dir.path()));

    for message in MESSAGES {
        assert_eq!(classifier.classify(message), classifier.classify(message));
    }
}

#[test]
fn blank_input_short_circuits_even_with_a_model() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(train_model(dir.path()));

    let result = classifier.classify(" \n\t ");
    assert_eq!(result.category, Category::Improdutivo);
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.origin, Origin::Heuristica);
    assert!(!classifier.gateway().is_loaded());
}

#[test]
fn productive_wording_is_produtivo_on_the_hybrid_path() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = Classifier::new(train_model(dir.path()));

    let result = classifier.classify("Favor verificar o protocolo, preciso do boleto urgente");
    assert_eq!(result.category, Category::Produtivo);
    assert_eq!(result.origin, Origin::Modelo);
}

#[test]
fn artifact_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = train_model(dir.path());

    let pipeline = TextPipeline::load(&model_path).unwrap();
    assert_eq!(pipeline.classes, vec!["Improdutivo", "Produtivo"]);
    let p = pipeline.positive_probability("Segue anexo o boleto para pagamento");
    assert!((0.0..=1.0).contains(&p));
    assert!(p > pipeline.positive_probability("Feliz natal a toda a equipe"));
}

#[test]
fn corrupt_artifact_degrades_to_heuristics() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    std::fs::write(&model_path, b"{ not json").unwrap();

    let classifier = Classifier::new(&model_path);
    let result = classifier.classify("Favor verificar o protocolo 12");
    assert_eq!(result.origin, Origin::Heuristica);
    assert_eq!(result.category, Category::Produtivo);
}
