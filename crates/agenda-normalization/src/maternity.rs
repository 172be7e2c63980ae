//! Maternity name canonicalization.

use tracing::debug;

use agenda_model::AuditConfig;

use crate::text::compact_key;

/// Shortest input accepted as an abbreviation of a known name.
const MIN_ABBREVIATION_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    /// Input contains nothing more than part of a known name.
    Abbreviation,
    /// A known name or alias appears inside the input.
    Contained,
    Exact,
}

/// Resolves free maternity text to a canonical name from the capacity table.
///
/// Matching runs on compact keys (accent-free, alphanumeric, upper-case):
/// exact match first, then a known name or alias contained in the input, then
/// the input contained in a known name. Among equal ranks the longest key
/// wins, then table order. Text that matches nothing yields `None`; it is
/// never assigned a default maternity.
pub fn canonicalize_maternity(text: &str, config: &AuditConfig) -> Option<String> {
    let input = compact_key(text);
    if input.is_empty() {
        return None;
    }
    let mut best: Option<(MatchRank, usize, &str)> = None;
    for entry in &config.maternities {
        let candidates =
            std::iter::once(entry.name.as_str()).chain(entry.aliases.iter().map(String::as_str));
        for candidate in candidates {
            let key = compact_key(candidate);
            if key.is_empty() {
                continue;
            }
            let rank = if key == input {
                MatchRank::Exact
            } else if input.contains(&key) {
                MatchRank::Contained
            } else if input.len() >= MIN_ABBREVIATION_LEN && key.contains(&input) {
                MatchRank::Abbreviation
            } else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_rank, best_len, _)) => (rank, key.len()) > (best_rank, best_len),
            };
            if better {
                best = Some((rank, key.len(), entry.name.as_str()));
            }
        }
    }
    if best.is_none() {
        debug!(maternity = text, "maternity text matched no known maternity");
    }
    best.map(|(_, _, name)| name.to_string())
}
