//! Resolution of classified queries against a menu snapshot.
//!
//! Two failure modes coexist on purpose. Policy violations and out-of-bounds ranges reject the
//! whole line, while an unknown id or an ambiguous name only drops that sub-query, so `1 2 99`
//! still selects `1` and `2`. A line is rejected when nothing at all resolves.

use crate::app::menu::MenuOptionSet;
use crate::app::query::parse_line;
use crate::domain::errors::QueryError;
use crate::domain::model::{
    Action, Policy, Query, QueryValue, Resolution, ResolutionBatch, ResolvedItem,
};

/// Parse `raw` and resolve it against `options` under `policy`.
pub fn resolve<V: Clone>(
    raw: &str,
    options: &MenuOptionSet<V>,
    policy: Policy,
) -> Result<Resolution<V>, QueryError> {
    let queries = parse_line(raw)?;
    if queries.is_empty() {
        return Ok(Resolution::Blank);
    }
    resolve_queries(raw, &queries, options, policy).map(Resolution::Batch)
}

/// Resolve already classified queries. `raw` is only used for error messages.
pub fn resolve_queries<V: Clone>(
    raw: &str,
    queries: &[Query],
    options: &MenuOptionSet<V>,
    policy: Policy,
) -> Result<ResolutionBatch<V>, QueryError> {
    if !policy.can_unselect && queries.iter().any(|query| query.action == Action::Unselect) {
        tracing::debug!(input = raw, "unselect not allowed on this menu");
        return Err(QueryError::no_match(raw));
    }
    if !policy.accepts_many && queries.len() > 1 {
        tracing::debug!(input = raw, count = queries.len(), "menu accepts a single query");
        return Err(QueryError::no_match(raw));
    }

    let mut items = Vec::new();
    for query in queries {
        for id in matching_ids(raw, query, options, policy)? {
            items.push(ResolvedItem {
                id,
                action: query.action,
                kind: query.kind(),
                value: options.value_of(id)?.clone(),
            });
        }
    }

    if items.is_empty() {
        return Err(QueryError::no_match(raw));
    }

    Ok(ResolutionBatch {
        items,
        query_count: queries.len(),
    })
}

fn matching_ids<V>(
    raw: &str,
    query: &Query,
    options: &MenuOptionSet<V>,
    policy: Policy,
) -> Result<Vec<u32>, QueryError> {
    match &query.value {
        QueryValue::All => {
            if !policy.accepts_many {
                return Err(QueryError::no_match(raw));
            }
            Ok(options.ids_in_order())
        }
        QueryValue::Range { min, max } => {
            if !policy.accepts_many {
                return Err(QueryError::no_match(raw));
            }
            positional_slice(options, *min, *max).ok_or_else(|| QueryError::no_match(raw))
        }
        QueryValue::Id(id) => {
            if options.has_id(*id) {
                Ok(vec![*id])
            } else {
                tracing::debug!(id, "dropping unknown id");
                Ok(Vec::new())
            }
        }
        QueryValue::Name(prefix) => {
            let matches = options.find_ids_by_name_prefix(prefix);
            if matches.len() == 1 {
                Ok(matches)
            } else {
                tracing::debug!(
                    query = %query.raw,
                    matches = matches.len(),
                    "name does not identify exactly one option"
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Ids at display positions `min..=max` (1-based). Bounds outside the set yield `None`.
fn positional_slice<V>(options: &MenuOptionSet<V>, min: u32, max: u32) -> Option<Vec<u32>> {
    let ids = options.ids_in_order();
    let start = usize::try_from(min).ok()?.checked_sub(1)?;
    let end = usize::try_from(max).ok()?;
    if start >= end || end > ids.len() {
        return None;
    }
    Some(ids[start..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::{MenuOption, QueryKind};

    fn numbered(count: u32) -> MenuOptionSet<String> {
        MenuOptionSet::from_entries(
            (1..=count).map(|n| (format!("file{n}.rs"), format!("file{n}.rs"), format!("/p/{n}"), false)),
        )
    }

    fn expect_batch(result: Result<Resolution<String>, QueryError>) -> ResolutionBatch<String> {
        match result.expect("line resolves") {
            Resolution::Batch(batch) => batch,
            Resolution::Blank => panic!("unexpected blank resolution"),
        }
    }

    fn ids(batch: &ResolutionBatch<String>) -> Vec<u32> {
        batch.items.iter().map(|item| item.id).collect()
    }

    fn no_match(input: &str) -> Result<Resolution<String>, QueryError> {
        Err(QueryError::NoMatch {
            input: input.into(),
        })
    }

    #[test]
    fn blank_input_is_its_own_result() {
        let empty = MenuOptionSet::<String>::default();
        for policy in [Policy::single(), Policy::many()] {
            let resolution = resolve("", &numbered(3), policy).unwrap();
            assert!(resolution.is_blank());
            assert_eq!(resolution.query_count(), 1);
            assert!(resolve("  ", &empty, policy).unwrap().is_blank());
        }
    }

    #[test]
    fn selects_single_id() {
        let batch = expect_batch(resolve("2", &numbered(3), Policy::single()));
        assert_eq!(batch.query_count, 1);
        assert_eq!(
            batch.items,
            vec![ResolvedItem {
                id: 2,
                action: Action::Select,
                kind: QueryKind::Id,
                value: "/p/2".to_string(),
            }]
        );
    }

    #[test]
    fn unselect_rejected_when_disallowed() {
        let policy = Policy {
            can_unselect: false,
            accepts_many: true,
        };
        assert_eq!(resolve("-1", &numbered(3), policy), no_match("-1"));
        assert_eq!(resolve("-7", &numbered(3), policy), no_match("-7"));
    }

    #[test]
    fn unselect_allowed_on_multi_menus() {
        let batch = expect_batch(resolve("-1 3", &numbered(3), Policy::many()));
        let actions: Vec<_> = batch.items.iter().map(|item| item.action).collect();
        assert_eq!(actions, vec![Action::Unselect, Action::Select]);
    }

    #[test]
    fn wildcard_requires_many() {
        assert_eq!(resolve("*", &numbered(3), Policy::single()), no_match("*"));
        let batch = expect_batch(resolve("*", &numbered(3), Policy::many()));
        assert_eq!(ids(&batch), vec![1, 2, 3]);
        assert!(batch.items.iter().all(|item| item.kind == QueryKind::All));
    }

    #[test]
    fn single_select_rejects_multiple_queries() {
        assert_eq!(resolve("1 2", &numbered(3), Policy::single()), no_match("1 2"));
        assert_eq!(resolve("1-2", &numbered(3), Policy::single()), no_match("1-2"));
    }

    #[test]
    fn range_slices_by_position() {
        let set = MenuOptionSet::new(vec![
            MenuOption::new(1, "one", "a".to_string()),
            MenuOption::new(5, "five", "b".to_string()),
            MenuOption::new(6, "six", "c".to_string()),
        ])
        .unwrap();
        let batch = expect_batch(resolve("1-2", &set, Policy::many()));
        assert_eq!(ids(&batch), vec![1, 5]);
        assert_eq!(batch.items[1].value, "b");
    }

    #[test]
    fn range_out_of_bounds_rejects_line() {
        assert_eq!(resolve("2-9", &numbered(3), Policy::many()), no_match("2-9"));
        assert_eq!(resolve("0-2", &numbered(3), Policy::many()), no_match("0-2"));
        assert_eq!(resolve("1 2-9", &numbered(3), Policy::many()), no_match("1 2-9"));
    }

    #[test]
    fn reversed_range_rejects_line() {
        assert_eq!(resolve("3-1", &numbered(3), Policy::many()), no_match("3-1"));
    }

    #[test]
    fn full_range_selects_everything() {
        let batch = expect_batch(resolve("1 - 3", &numbered(3), Policy::many()));
        assert_eq!(ids(&batch), vec![1, 2, 3]);
        assert_eq!(batch.query_count, 1);
    }

    #[test]
    fn ambiguous_name_is_rejected() {
        let set = MenuOptionSet::from_entries([
            ("one.js", "one.js", "/one.js".to_string(), false),
            ("only.js", "only.js", "/only.js".to_string(), false),
        ]);
        assert_eq!(resolve("on", &set, Policy::single()), no_match("on"));
        let batch = expect_batch(resolve("ONL", &set, Policy::single()));
        assert_eq!(ids(&batch), vec![2]);
        assert_eq!(batch.items[0].kind, QueryKind::Name);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let batch = expect_batch(resolve("1 99", &numbered(3), Policy::many()));
        assert_eq!(ids(&batch), vec![1]);
        assert_eq!(batch.query_count, 2);

        let batch = expect_batch(resolve("1 2 99", &numbered(3), Policy::many()));
        assert_eq!(ids(&batch), vec![1, 2]);
    }

    #[test]
    fn nothing_resolved_rejects_line() {
        assert_eq!(resolve("98 99", &numbered(3), Policy::many()), no_match("98 99"));
        assert_eq!(resolve("zzz", &numbered(3), Policy::many()), no_match("zzz"));
        assert_eq!(resolve("1", &MenuOptionSet::default(), Policy::many()), no_match("1"));
    }

    #[test]
    fn items_follow_query_order() {
        let batch = expect_batch(resolve("3, 1, file2", &numbered(3), Policy::many()));
        assert_eq!(ids(&batch), vec![3, 1, 2]);
    }

    #[test]
    fn malformed_token_rejects_line() {
        assert!(matches!(
            resolve("1 - , 2", &numbered(3), Policy::many()),
            Err(QueryError::InvalidQuery { .. })
        ));
    }
}
