//! Rule tables for the lexical scorer.
//!
//! Patterns run against text that is already lowercased and accent-folded,
//! so they are written without diacritics. Each entry contributes its weight
//! at most once per scoring call, however many times it matches.
//!
//! Bump [`LEXICON_VERSION`] whenever an entry is added, removed or reweighted.

/// Version tag of the rule tables, reported by the diagnostics endpoint.
pub const LEXICON_VERSION: &str = "2024.1";

/// One row of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    /// Regular expression (case-insensitive, accent-free).
    pub pattern: &'static str,
    /// Points added when the pattern matches anywhere.
    pub weight: u32,
}

const fn hit(pattern: &'static str) -> LexiconEntry {
    LexiconEntry { pattern, weight: 1 }
}

/// Signals that the sender expects action or an answer.
pub const PRODUCTIVE_RULES: &[LexiconEntry] = &[
    // tracking / flow
    hit(r"\bprotocolo\b"),
    hit(r"\bchamado\b"),
    hit(r"\bticket\b"),
    hit(r"\bcase\b"),
    hit(r"\bcaso\b"),
    hit(r"\bstatus\b"),
    hit(r"\batualiza\w*\b"),
    hit(r"\bretorno\b"),
    hit(r"\bposi\w*\b"),
    hit(r"\bpendenc\w*\b"),
    hit(r"\bacompanha\w*\b"),
    hit(r"\bprioridade\b"),
    hit(r"\burgent\w*\b"),
    hit(r"\bprazo\b"),
    hit(r"\bsla\b"),
    // support / failures
    hit(r"\bsuporte\b"),
    hit(r"\bhelpdesk\b"),
    hit(r"\bproblema\b"),
    hit(r"\bocorr\w*\b"),
    hit(r"\berro\w*\b"),
    hit(r"\bfalh\w*\b"),
    hit(r"\bbug\b"),
    hit(r"\binciden\w*\b"),
    // documents / financial
    hit(r"\banex\w*\b"),
    hit(r"\bdocument\w*\b"),
    hit(r"\bnfe?\b"),
    hit(r"\bnota\s*fiscal\b"),
    hit(r"\bcontrat\w*\b"),
    hit(r"\bcomprovant\w*\b"),
    hit(r"\bbolet\w*\b"),
    hit(r"\bfatur\w*\b"),
    hit(r"\bpropost\w*\b"),
    hit(r"\borcament\w*\b"),
    // action verbs
    hit(r"\bvalid\w*\b"),
    hit(r"\bhomolog\w*\b"),
    hit(r"\bliber\w*\b"),
    hit(r"\bdesbloque\w*\b"),
    hit(r"\bativ\w*\b"),
    hit(r"\bdesativ\w*\b"),
    hit(r"\bcancel\w*\b"),
    hit(r"\breembols\w*\b"),
    hit(r"\bregulariz\w*\b"),
    hit(r"\brevis\w*\b"),
    // direct requests
    hit(r"\bverific\w*\b"),
    hit(r"\bconfirm\w*\b"),
    hit(r"\binform\w*\b"),
    hit(r"\bencaminh\w*\b"),
    hit(r"\benvi\w*\b"),
    hit(r"\bchec\w*\b"),
    hit(r"\bsolicit\w*\b"),
    hit(r"\bprecis\w*\b"),
    hit(r"\bfavor\b"),
    hit(r"\bpor favor\b"),
    // identifiers
    hit(r"\bprotocolo\s*\d+\b"),
    hit(r"\bchamado\s*\d+\b"),
];

/// Greetings, thanks, wishes and sign-offs.
pub const COURTESY_RULES: &[LexiconEntry] = &[
    hit(r"\bobrigad\w*\b"),
    hit(r"\bagrade\w*\b"),
    hit(r"\bvaleu\b"),
    hit(r"\bmuito\s+obrigad\w*\b"),
    hit(r"\bparab\w*\b"),
    hit(r"\bboas\s+festas\b"),
    hit(r"\bfeliz\s+natal\b"),
    hit(r"\bfeliz\s+ano\s+novo\b"),
    hit(r"\bbo[am]\s+dia\b"),
    hit(r"\bboa\s+tarde\b"),
    hit(r"\bboa\s+noite\b"),
    hit(r"\bbom\s+fim\s+de\s+semana\b"),
    hit(r"\babrac\w*\b"),
    hit(r"\batenciosamente\b"),
    hit(r"\bcordialmente\b"),
    hit(r"\batt\b"),
    hit(r"\bciente\b"),
    hit(r"\brecebido\b"),
    hit(r"\bok\b"),
    hit(r"\bperfeito\b"),
    hit(r"\bshow\b"),
    hit(r"\bgrato\w*\b"),
    hit("\u{1F44D}"),
    hit("\u{1F64F}"),
];

/// Strong action/urgency terms. Applied once, after the base sweep.
pub const ACTION_BOOST: LexiconEntry = LexiconEntry {
    pattern: concat!(
        r"\b(",
        r"protocolo|chamado|status|suporte|erro|falh\w*|fatura|boleto|nota\s*fiscal|nfe|",
        r"valid\w*|liber\w*|desbloque\w*|desativ\w*|cancel\w*|reembols\w*|",
        r"verific\w*|confirm\w*|inform\w*|encaminh\w*|envi\w*|solicit\w*|",
        r"urgente|prioridade|prazo|sla",
        r")\b",
    ),
    weight: 3,
};

/// Explicit request phrasing ("podem verificar", "favor confirmar", "aguardo retorno").
pub const REQUEST_BOOST: LexiconEntry = LexiconEntry {
    pattern: concat!(
        r"(pode[m]?\s+(verificar|informar|confirmar|enviar|ver)\b|",
        r"favor\s+(verificar|informar|confirmar|enviar)\b|",
        r"aguardo\s+(retorno|posi\w*)\b)",
    ),
    weight: 2,
};
