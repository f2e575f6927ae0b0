//! Recursive grouping of entries into a tree of statistics rows

use crate::{
    error::{AppError, AppResult},
    models::{
        statistics::{EntryType, GroupBy, GroupKey, StatisticsRequest, StatisticsRow},
        Entry,
    },
};

use super::{interval::time_buckets, select::select_values};

/// Entries sharing one group key at a given level
struct Group<'a> {
    key: GroupKey,
    entries: Vec<&'a Entry>,
}

/// Build the rows for `level` of the request's grouping and recurse into the
/// next level.
///
/// `dont_negate_cost` switches off sign normalization: it starts out set when
/// the request filters on entry type, and is forced on below entry type and
/// category groups, where every group is already homogeneous.
pub fn group_and_select(
    entries: &[&Entry],
    request: &StatisticsRequest,
    level: usize,
    dont_negate_cost: bool,
) -> AppResult<Vec<StatisticsRow>> {
    let grouping = request.grouping();

    if level < grouping.len() {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let (groups, dont_negate_cost) =
            partition(grouping[level], entries, request, dont_negate_cost)?;
        return groups
            .into_iter()
            .map(|group| build_row(group, request, level, dont_negate_cost))
            .collect();
    }

    if level == 0 && !entries.is_empty() {
        return Ok(vec![StatisticsRow {
            key: None,
            values: Some(select_values(entries, &request.select_values, dont_negate_cost)),
            sub_rows: None,
        }]);
    }

    Ok(Vec::new())
}

fn build_row(
    group: Group<'_>,
    request: &StatisticsRequest,
    level: usize,
    dont_negate_cost: bool,
) -> AppResult<StatisticsRow> {
    let is_deepest = level + 1 == request.grouping().len();

    let sub_rows = if is_deepest {
        None
    } else {
        Some(group_and_select(&group.entries, request, level + 1, dont_negate_cost)?)
    };
    let values = (is_deepest || request.select_on_all_levels)
        .then(|| select_values(&group.entries, &request.select_values, dont_negate_cost));

    Ok(StatisticsRow {
        key: Some(group.key),
        values,
        sub_rows,
    })
}

/// Split `entries` along one dimension. Returns the non-empty groups in
/// output order, together with the sign flag their rows are computed with.
fn partition<'a>(
    dimension: GroupBy,
    entries: &[&'a Entry],
    request: &StatisticsRequest,
    dont_negate_cost: bool,
) -> AppResult<(Vec<Group<'a>>, bool)> {
    match dimension {
        GroupBy::EntryType => Ok((by_entry_type(entries), true)),
        GroupBy::Category => Ok((by_category(entries), true)),
        GroupBy::Tag => Ok((by_tag(entries), dont_negate_cost)),
        GroupBy::TimeInterval => {
            let props = request.group_by_time_interval_properties.as_ref().ok_or_else(|| {
                AppError::Internal(
                    "time_interval grouping reached without interval properties".to_string(),
                )
            })?;
            let groups = time_buckets(entries, props)?
                .into_iter()
                .map(|bucket| Group {
                    key: GroupKey::TimeInterval {
                        date_from: bucket.date_from,
                        date_to: bucket.date_to,
                    },
                    entries: bucket.entries,
                })
                .collect();
            Ok((groups, dont_negate_cost))
        }
    }
}

/// Cost first, then income
fn by_entry_type<'a>(entries: &[&'a Entry]) -> Vec<Group<'a>> {
    [EntryType::Cost, EntryType::Income]
        .into_iter()
        .filter_map(|entry_type| {
            let members: Vec<&Entry> = entries
                .iter()
                .copied()
                .filter(|e| entry_type.matches(e.category_is_income))
                .collect();
            (!members.is_empty()).then(|| Group {
                key: GroupKey::EntryType(entry_type),
                entries: members,
            })
        })
        .collect()
}

/// One group per category, in list order
fn by_category<'a>(entries: &[&'a Entry]) -> Vec<Group<'a>> {
    let mut categories: Vec<(i32, &str)> = Vec::new();
    for entry in entries {
        if !categories.iter().any(|(_, k)| *k == entry.category_keyword) {
            categories.push((entry.category_order_on_list, entry.category_keyword.as_str()));
        }
    }
    categories.sort();

    categories
        .into_iter()
        .map(|(_, keyword)| Group {
            key: GroupKey::Category(keyword.to_string()),
            entries: entries
                .iter()
                .copied()
                .filter(|e| e.category_keyword == keyword)
                .collect(),
        })
        .collect()
}

/// One group per tag name (case-insensitive, first spelling wins), sorted by
/// name, followed by the untagged entries under an empty name.
fn by_tag<'a>(entries: &[&'a Entry]) -> Vec<Group<'a>> {
    let mut tags: Vec<(String, &str)> = Vec::new();
    for name in entries.iter().flat_map(|e| e.tag_names.iter()) {
        let folded = name.to_lowercase();
        if !tags.iter().any(|(f, _)| *f == folded) {
            tags.push((folded, name.as_str()));
        }
    }
    tags.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<Group<'a>> = tags
        .into_iter()
        .map(|(folded, name)| Group {
            key: GroupKey::Tag(name.to_string()),
            entries: entries
                .iter()
                .copied()
                .filter(|e| e.tag_names.iter().any(|t| t.to_lowercase() == folded))
                .collect(),
        })
        .collect();

    let untagged: Vec<&Entry> = entries
        .iter()
        .copied()
        .filter(|e| e.tag_names.is_empty())
        .collect();
    if !untagged.is_empty() {
        groups.push(Group {
            key: GroupKey::Tag(String::new()),
            entries: untagged,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statistics::{IntervalUnit, Selection, TimeIntervalProperties};
    use crate::stats::fixtures::{date, sample_entries};
    use crate::stats::{end_of_day, start_of_day};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn request(group_by: &[GroupBy]) -> StatisticsRequest {
        StatisticsRequest {
            group_by: Some(group_by.to_vec()),
            group_by_time_interval_properties: Some(TimeIntervalProperties {
                reference_date: date(2022, 6, 1),
                interval_length: 7,
                interval_unit: IntervalUnit::Day,
            }),
            select_values: vec![Selection::Count, Selection::Sum],
            ..Default::default()
        }
    }

    fn rows(request: &StatisticsRequest, dont_negate_cost: bool) -> Vec<StatisticsRow> {
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        group_and_select(&refs, request, 0, dont_negate_cost).unwrap()
    }

    fn keys(rows: &[StatisticsRow]) -> Vec<GroupKey> {
        rows.iter().filter_map(|r| r.key.clone()).collect()
    }

    fn selected(rows: &[StatisticsRow], selection: Selection) -> Vec<Decimal> {
        rows.iter()
            .map(|r| r.values.as_ref().unwrap()[&selection])
            .collect()
    }

    fn tag(name: &str) -> GroupKey {
        GroupKey::Tag(name.to_string())
    }

    fn category(keyword: &str) -> GroupKey {
        GroupKey::Category(keyword.to_string())
    }

    /// Depth of every leaf below `rows`
    fn leaf_depths(rows: &[StatisticsRow], depth: usize, out: &mut Vec<usize>) {
        for row in rows {
            match &row.sub_rows {
                Some(children) => leaf_depths(children, depth + 1, out),
                None => out.push(depth),
            }
        }
    }

    #[test]
    fn test_without_grouping_single_total_row() {
        let req = StatisticsRequest {
            select_values: vec![Selection::Count],
            ..Default::default()
        };
        let result = rows(&req, false);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key, None);
        assert_eq!(result[0].sub_rows, None);
        assert_eq!(selected(&result, Selection::Count), vec![dec!(6)]);
    }

    #[test]
    fn test_no_entries_no_rows() {
        for group_by in [vec![], vec![GroupBy::Tag, GroupBy::Category]] {
            let req = request(&group_by);
            assert!(group_and_select(&[], &req, 0, false).unwrap().is_empty());
        }
    }

    #[test]
    fn test_entry_type_groups_cost_first_unsigned() {
        let result = rows(&request(&[GroupBy::EntryType]), false);

        assert_eq!(
            keys(&result),
            vec![
                GroupKey::EntryType(EntryType::Cost),
                GroupKey::EntryType(EntryType::Income)
            ]
        );
        assert_eq!(selected(&result, Selection::Count), vec![dec!(4), dec!(2)]);
        assert_eq!(selected(&result, Selection::Sum), vec![dec!(100.61), dec!(3259.56)]);
    }

    #[test]
    fn test_category_groups_in_list_order() {
        let result = rows(&request(&[GroupBy::Category]), false);

        assert_eq!(
            keys(&result),
            vec![category("salary"), category("gift"), category("food"), category("transport")]
        );
        assert_eq!(
            selected(&result, Selection::Sum),
            vec![dec!(3200), dec!(59.56), dec!(80.61), dec!(20.00)]
        );
    }

    #[test]
    fn test_tag_groups_sorted_with_untagged_last() {
        let result = rows(&request(&[GroupBy::Tag]), false);

        assert_eq!(keys(&result), vec![tag("Family"), tag("shopping"), tag("Work"), tag("")]);
        assert_eq!(
            selected(&result, Selection::Count),
            vec![dec!(2), dec!(2), dec!(1), dec!(2)]
        );
        assert_eq!(
            selected(&result, Selection::Sum),
            vec![dec!(-0.89), dec!(-78.10), dec!(3200), dec!(-22.51)]
        );
    }

    #[test]
    fn test_untagged_group_omitted_when_empty() {
        let mut req = request(&[GroupBy::Tag]);
        req.tag_filter = Some(vec!["family".to_string()]);
        let entries = sample_entries();
        let filtered = crate::stats::filter_entries(&entries, &req);

        let result = group_and_select(&filtered, &req, 0, false).unwrap();
        assert_eq!(keys(&result), vec![tag("Family"), tag("shopping")]);
    }

    #[test]
    fn test_time_interval_groups() {
        let result = rows(&request(&[GroupBy::TimeInterval]), false);

        assert_eq!(result.len(), 5);
        assert_eq!(
            result[0].key,
            Some(GroupKey::TimeInterval {
                date_from: start_of_day(date(2022, 5, 11)),
                date_to: end_of_day(date(2022, 5, 17)).unwrap(),
            })
        );
        assert_eq!(
            selected(&result, Selection::Sum),
            vec![dec!(3139.55), dec!(-20.00), dec!(-17.65), dec!(59.56), dec!(-2.51)]
        );
    }

    #[test]
    fn test_nested_levels_values_only_on_leaves() {
        let result = rows(&request(&[GroupBy::EntryType, GroupBy::Category]), false);

        assert!(result.iter().all(|r| r.values.is_none()));
        let cost = result[0].sub_rows.as_ref().unwrap();
        assert_eq!(keys(cost), vec![category("food"), category("transport")]);
        assert!(cost.iter().all(|r| r.sub_rows.is_none()));
        assert_eq!(selected(cost, Selection::Sum), vec![dec!(80.61), dec!(20.00)]);

        let income = result[1].sub_rows.as_ref().unwrap();
        assert_eq!(keys(income), vec![category("salary"), category("gift")]);
    }

    #[test]
    fn test_select_on_all_levels() {
        let mut req = request(&[GroupBy::Tag, GroupBy::EntryType]);
        req.select_on_all_levels = true;
        let result = rows(&req, false);

        // Tag rows keep the signed totals, entry type rows below are unsigned
        assert_eq!(selected(&result, Selection::Sum)[0], dec!(-0.89));
        let family = result[0].sub_rows.as_ref().unwrap();
        assert_eq!(selected(family, Selection::Sum), vec![dec!(60.45), dec!(59.56)]);
        assert!(family.iter().all(|r| r.sub_rows.is_none()));
    }

    #[test]
    fn test_tag_below_entry_type_inherits_unsigned_values() {
        let result = rows(&request(&[GroupBy::EntryType, GroupBy::Tag]), false);

        let cost = result[0].sub_rows.as_ref().unwrap();
        assert_eq!(keys(cost), vec![tag("Family"), tag("shopping"), tag("")]);
        assert_eq!(
            selected(cost, Selection::Sum),
            vec![dec!(60.45), dec!(78.10), dec!(22.51)]
        );
    }

    #[test]
    fn test_tree_depth_matches_group_by() {
        let group_by = [
            GroupBy::TimeInterval,
            GroupBy::EntryType,
            GroupBy::Category,
            GroupBy::Tag,
        ];
        let result = rows(&request(&group_by), false);

        let mut depths = Vec::new();
        leaf_depths(&result, 1, &mut depths);
        assert!(!depths.is_empty());
        assert!(depths.iter().all(|d| *d == group_by.len()));
    }

    #[test]
    fn test_partition_keeps_every_entry_once() {
        let result = rows(&request(&[GroupBy::Category, GroupBy::TimeInterval]), false);

        let total: Decimal = result
            .iter()
            .flat_map(|r| r.sub_rows.as_ref().unwrap())
            .map(|r| r.values.as_ref().unwrap()[&Selection::Count])
            .sum();
        assert_eq!(total, dec!(6));
    }

    #[test]
    fn test_missing_interval_properties_is_internal_error() {
        let mut req = request(&[GroupBy::TimeInterval]);
        req.group_by_time_interval_properties = None;
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();

        assert!(matches!(
            group_and_select(&refs, &req, 0, false),
            Err(AppError::Internal(_))
        ));
    }
}
