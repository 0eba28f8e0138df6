//! Deterministic sentence segmentation for Portuguese free text.
//!
//! Splits on sentence terminators and newlines, trims each segment, drops
//! empty ones, and caps the output. A non-blank text always yields at least
//! one sentence (the whole trimmed text as fallback).

/// Cap on sentences fed into the peer-feedback pipeline.
pub const MAX_SENTENCES: usize = 12;

pub fn split_sentences(text: &str, max: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for ch in trimmed.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?' | '…' | '\n') {
            push_sentence(&mut out, &mut current);
            if out.len() >= max {
                return out;
            }
        }
    }
    push_sentence(&mut out, &mut current);

    if out.is_empty() {
        out.push(trimmed.to_string());
    }
    out
}

fn push_sentence(out: &mut Vec<String>, buf: &mut String) {
    let s = buf.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
    buf.clear();
}
