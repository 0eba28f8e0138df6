// tests/peer_pipeline.rs
//
// End-to-end peer-feedback pipeline over the lexicon classifier: sentence
// splitting, per-sentence judgments, and evidence aggregation.

use std::sync::Arc;

use feedback_sentiment_service::ai::LexiconClassifier;
use feedback_sentiment_service::peer::PeerAnalyzer;
use feedback_sentiment_service::PolarityLabel;

fn analyzer() -> PeerAnalyzer {
    PeerAnalyzer::new(Arc::new(LexiconClassifier))
}

#[tokio::test]
async fn splits_and_judges_in_sentence_order() {
    let text = "O design do componente ficou excelente. A entrega teve problemas.";
    let analysis = analyzer().analyze(text).await;

    assert_eq!(analysis.judgments.len(), 2);
    assert_eq!(
        analysis.judgments[0].sentence,
        "O design do componente ficou excelente."
    );
    assert_eq!(analysis.judgments[0].label, PolarityLabel::Positive);
    assert_eq!(
        analysis.judgments[1].sentence,
        "A entrega teve problemas."
    );
    assert_eq!(analysis.judgments[1].label, PolarityLabel::Negative);
}

#[tokio::test]
async fn repeated_negatives_surface_an_improvement() {
    let text =
        "O design do componente ficou excelente. A entrega teve problemas. Entrega atrasada de novo.";
    let analysis = analyzer().analyze(text).await;

    assert_eq!(analysis.aggregation.strengths.len(), 1);
    assert_eq!(analysis.aggregation.strengths[0].aspect, "arquitetura");

    assert_eq!(analysis.aggregation.improvements.len(), 1);
    let imp = &analysis.aggregation.improvements[0];
    assert_eq!(imp.aspect, "entrega");
    assert!(imp.evidence.is_some());
    assert!(!imp.suggestion.is_empty());
}

#[tokio::test]
async fn unresolvable_text_reports_single_geral_bucket() {
    let text = "Tudo certo. Nada a comentar.";
    let analysis = analyzer().analyze(text).await;

    let aspects = &analysis.aggregation.aspects;
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect, "geral");
    assert!(analysis.aggregation.strengths.is_empty());
    assert!(analysis.aggregation.improvements.is_empty());
}

#[tokio::test]
async fn judgment_scores_stay_in_unit_interval() {
    let text = "Péssimo alinhamento! Ótima colaboração. Tudo travou de novo, sem chance.";
    let analysis = analyzer().analyze(text).await;

    assert!(!analysis.judgments.is_empty());
    for j in &analysis.judgments {
        assert!((0.0..=1.0).contains(&j.score), "{}: {}", j.sentence, j.score);
    }
    assert!((0.0..=1.0).contains(&analysis.overall.score));
}
