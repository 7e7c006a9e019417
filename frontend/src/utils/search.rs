//! Client-side fuzzy matching for table rows.
//!
//! Matching is case and accent insensitive. The query is split on whitespace and
//! every token has to match at least one field, either as a substring or through
//! the skim matcher. A skim match only counts when each run of matched characters
//! starts a word, so `jperez` finds "Juan Pérez" but `perez` does not find
//! "Pedro Juárez". Substring hits always outrank skim hits.

use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

const SUBSTRING_BASE: i64 = 100_000;
const SUBSTRING_POSITIONS: i64 = 1_000;

pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// True when every run of consecutive matched char indices begins a word.
fn runs_start_words(field: &str, indices: &[usize]) -> bool {
    let chars: Vec<char> = field.chars().collect();
    let word_start = |idx: usize| idx == 0 || chars.get(idx - 1).map_or(true, |c| !c.is_alphanumeric());
    indices
        .iter()
        .enumerate()
        .filter(|(pos, idx)| *pos == 0 || indices[pos - 1] + 1 != **idx)
        .all(|(_, idx)| word_start(*idx))
}

fn token_score(matcher: &SkimMatcherV2, token: &str, field: &str) -> Option<i64> {
    if let Some(pos) = field.find(token) {
        return Some(SUBSTRING_BASE + SUBSTRING_POSITIONS - (pos as i64).min(SUBSTRING_POSITIONS - 1));
    }
    let (score, indices) = matcher.fuzzy_indices(field, token)?;
    runs_start_words(field, &indices).then(|| score.clamp(1, SUBSTRING_BASE - 1))
}

/// Score of `query` against `fields`, `None` when some token matches nothing.
/// An empty query matches everything with score 0.
pub fn fuzzy_score<S: AsRef<str>>(query: &str, fields: &[S]) -> Option<i64> {
    let matcher = SkimMatcherV2::default();
    let normalized: Vec<String> = fields.iter().map(|f| normalize(f.as_ref())).collect();
    normalize(query)
        .split_whitespace()
        .try_fold(0, |total, token| {
            normalized
                .iter()
                .filter_map(|field| token_score(&matcher, token, field))
                .max()
                .map(|best| total + best)
        })
}

fn scored<T, F>(items: &[T], query: &str, fields: F) -> Vec<(Option<i64>, usize)>
where
    F: Fn(&T) -> Vec<String>,
{
    let mut scored: Vec<(Option<i64>, usize)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (fuzzy_score(query, &fields(item)), idx))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
}

/// Keeps the items matching `query`, best matches first. Ties keep their
/// original order.
pub fn fuzzy_filter<T, F>(items: &[T], query: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    if query.trim().is_empty() {
        return items.to_vec();
    }
    scored(items, query, fields)
        .into_iter()
        .filter(|(score, _)| score.is_some())
        .map(|(_, idx)| items[idx].clone())
        .collect()
}

/// Reorders rows the backend already matched: local matches first, best first,
/// then the rest in their original order. Nothing is dropped.
pub fn fuzzy_rank<T, F>(items: &[T], query: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    if query.trim().is_empty() {
        return items.to_vec();
    }
    scored(items, query, fields)
        .into_iter()
        .map(|(_, idx)| items[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec![
            "Juan Pérez".to_string(),
            "María Gómez".to_string(),
            "Pedro Juárez".to_string(),
        ]
    }

    #[test]
    fn normalize_folds_case_and_accents() {
        assert_eq!(normalize("ÁrBOL Ñandú"), "arbol nandu");
    }

    #[test]
    fn accent_insensitive_substring_match() {
        let result = fuzzy_filter(&names(), "perez", |n| vec![n.clone()]);
        assert_eq!(result, vec!["Juan Pérez".to_string()]);
    }

    #[test]
    fn subsequence_match_is_accepted() {
        assert!(fuzzy_score("jperez", &["Juan Pérez"]).is_some());
        assert!(fuzzy_score("zxq", &["Juan Pérez"]).is_none());
    }

    #[test]
    fn every_token_must_match_some_field() {
        let fields = ["Pedro Juárez", "Proyecto Alfa"];
        assert!(fuzzy_score("pedro alfa", &fields).is_some());
        assert!(fuzzy_score("pedro beta", &fields).is_none());
    }

    #[test]
    fn substring_hits_rank_before_subsequence_hits() {
        let items = vec!["j-u-a-r-e-z".to_string(), "Juárez".to_string()];
        let result = fuzzy_filter(&items, "juarez", |n| vec![n.clone()]);
        assert_eq!(result[0], "Juárez");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn scattered_letters_across_words_do_not_match() {
        assert!(fuzzy_score("perez", &["Pedro Juárez"]).is_none());
        assert!(fuzzy_score("jp", &["Juan Pérez"]).is_some());
    }

    #[test]
    fn rank_keeps_rows_without_a_local_match() {
        let items = vec!["Soporte".to_string(), "Proyecto Alfa".to_string()];
        let result = fuzzy_rank(&items, "alfa", |n| vec![n.clone()]);
        assert_eq!(result, vec!["Proyecto Alfa".to_string(), "Soporte".to_string()]);
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        assert_eq!(fuzzy_filter(&names(), "   ", |n| vec![n.clone()]), names());
    }
}
