//! Improvement advisor: maps a canonical area plus polarity context to a
//! fixed, human-readable suggestion.
//!
//! Area normalization runs over one ordered cue table (first matching row
//! wins) instead of a keyword cascade, so precedence is auditable.

use crate::normalize::normalize;
use crate::sentiment::PolarityLabel;

/// Ordered (cues, canonical area) rows; row order is the documented priority.
const AREA_CUES: &[(&[&str], &str)] = &[
    (&["fila", "atraso", "espera", "demora"], "tempo de espera"),
    (&["erro", "bug"], "erro"),
    (&["falha", "travou", "queda"], "falha"),
    (&["instab", "estabilidade"], "instabilidade"),
    (&["lenti", "performance", "lento"], "performance"),
    (&["sistema"], "sistema"),
    (&["usabilidade", "ux", "ui"], "usabilidade"),
    (&["comunicacao"], "comunicacao"),
    (&["documentacao"], "documentacao"),
    (&["entrega"], "entrega"),
    (&["disponibilidade"], "disponibilidade"),
    (&["preco", "caro", "barato"], "preco"),
    (&["atendimento", "suporte"], "atendimento"),
];

/// Areas that indicate a problem regardless of the label.
const NEG_AREAS: &[&str] = &[
    "tempo de espera",
    "performance",
    "instabilidade",
    "erro",
    "falha",
    "sistema",
    "usabilidade",
    "comunicacao",
    "documentacao",
    "entrega",
    "disponibilidade",
    "preco",
    "fila",
    "atraso",
    "lentidao",
];

/// Negative cue words/phrases checked against the normalized original text.
const NEG_CUES: &[&str] = &[
    "mas",
    "porem",
    "no entanto",
    "todavia",
    "contudo",
    "atraso",
    "demora",
    "fila",
    "lento",
    "lentidao",
    "falha",
    "erro",
    "travou",
    "mensagens de erro",
    "nao consegui",
    "frustrado",
    "insatisfeito",
];

/// Normalize a free-form reason/aspect into a canonical area.
/// Unknown areas pass through normalized; blank input becomes "geral".
pub fn normalize_area(reason: &str) -> String {
    let r = normalize(reason);
    if r.is_empty() {
        return "geral".to_string();
    }
    for (cues, area) in AREA_CUES {
        if cues.iter().any(|c| r.contains(c)) {
            return (*area).to_string();
        }
    }
    r
}

fn has_negative_cue(text: &str) -> bool {
    let t = normalize(text);
    NEG_CUES.iter().any(|c| t.contains(c))
}

/// Suggest an action for the given label/area/original text. Total function.
pub fn suggest(label: PolarityLabel, reason_or_aspect: &str, original_text: &str) -> String {
    let area = normalize_area(reason_or_aspect);

    let negative_leaning = NEG_AREAS.contains(&area.as_str())
        || has_negative_cue(original_text)
        || matches!(label, PolarityLabel::Negative | PolarityLabel::Mixed);

    if negative_leaning {
        mitigation_for(&area).to_string()
    } else {
        preserve_for(&area).to_string()
    }
}

fn mitigation_for(area: &str) -> &'static str {
    match area {
        "tempo de espera" => {
            "Reduzir tempo de resposta: revisar SLAs, dimensionar equipe nos picos e informar tempo estimado de espera."
        }
        "performance" => {
            "Otimizar performance: remover gargalos, adicionar caching quando viável e monitorar tempos p95/p99."
        }
        "instabilidade" => {
            "Elevar estabilidade: corrigir causas-raiz, melhorar observabilidade (logs/métricas/tracing) e usar circuit breakers."
        }
        "erro" => {
            "Priorizar correção de erros: tratar bugs reincidentes, cobrir com testes e alertar proativamente."
        }
        "falha" => {
            "Endereçar falhas críticas: reforçar tolerância a falhas, políticas de retry e rollback seguro."
        }
        "sistema" => {
            "Aumentar confiabilidade do sistema: eliminar pontos de travamento e revisar dependências externas."
        }
        "usabilidade" => {
            "Melhorar usabilidade: simplificar passos, aprimorar feedback visual e revisar textos/instruções."
        }
        "comunicacao" => {
            "Aprimorar comunicação: atualizar status proativamente e alinhar expectativas de prazo."
        }
        "documentacao" => {
            "Atualizar documentação: criar guias curtos, exemplos claros e troubleshooting acessível."
        }
        "entrega" => {
            "Otimizar fluxo de entrega: alinhar prazos, checagem de qualidade e confirmação de recebimento."
        }
        "disponibilidade" => {
            "Elevar disponibilidade: remover SPOFs, planejar janelas e implementar failover."
        }
        "preco" => {
            "Reavaliar valor/preço: oferecer planos flexíveis e comunicar benefícios com clareza."
        }
        "atendimento" => {
            "Padronizar atendimento: roteiros objetivos, treinamento contínuo e acompanhamento de satisfação por contato."
        }
        _ => {
            "Aplicar melhoria dirigida: revisar a causa mencionada e definir plano de ação com responsável e prazo."
        }
    }
}

fn preserve_for(area: &str) -> &'static str {
    match area {
        "atendimento" => {
            "Manter e documentar boas práticas de atendimento (clareza, cordialidade, resolução rápida)."
        }
        _ => "Manter o padrão do que funcionou bem; capturar boas práticas e replicar.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_time_area_gets_its_mitigation() {
        let s = suggest(PolarityLabel::Negative, "demora", "a demora foi grande");
        assert!(s.starts_with("Reduzir tempo de resposta"), "got {s}");
    }

    #[test]
    fn positive_atendimento_keeps_good_practice() {
        let s = suggest(PolarityLabel::Positive, "atendimento", "O atendimento foi otimo");
        assert!(s.starts_with("Manter e documentar boas práticas"), "got {s}");
    }

    #[test]
    fn positive_unknown_area_keeps_generic_practice() {
        let s = suggest(PolarityLabel::Positive, "elogios", "gostei de tudo");
        assert!(s.starts_with("Manter o padrão"), "got {s}");
    }

    #[test]
    fn mixed_label_is_negative_leaning() {
        let s = suggest(PolarityLabel::Mixed, "usabilidade", "boa ideia, tela confusa");
        assert!(s.starts_with("Melhorar usabilidade"), "got {s}");
    }

    #[test]
    fn negative_cue_in_text_forces_mitigation() {
        // Positive label, neutral area, but "nao consegui" flips the decision.
        let s = suggest(PolarityLabel::Positive, "geral", "nao consegui finalizar");
        assert!(s.starts_with("Aplicar melhoria dirigida"), "got {s}");
    }

    #[test]
    fn normalize_area_handles_accents_and_blank() {
        assert_eq!(normalize_area("Comunicação"), "comunicacao");
        assert_eq!(normalize_area(""), "geral");
        assert_eq!(normalize_area("velocidade/tempo de resposta"), "velocidade/tempo de resposta");
    }
}
