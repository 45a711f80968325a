use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::models::{ArtistRecord, QueryState, SortKey};

const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";

/// Stand-in birth date for records whose date text does not parse, so they
/// still take part in age ordering.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid sentinel date")
}

/// Parses strict `DD/MM/YYYY`; anything else, including short or unpadded
/// fields, maps to [`sentinel_date`].
pub fn parse_date_of_birth(value: &str) -> NaiveDate {
    let value = value.trim();
    if !has_date_of_birth_shape(value) {
        return sentinel_date();
    }
    NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT).unwrap_or_else(|_| sentinel_date())
}

// chrono accepts unpadded fields and signed or short years, so the fixed
// layout is checked before handing the text over.
fn has_date_of_birth_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            2 | 5 => *byte == b'/',
            _ => byte.is_ascii_digit(),
        })
}

/// Whole calendar years between the birth date and `today`; zero for dates
/// in the future.
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> u32 {
    today
        .years_since(parse_date_of_birth(date_of_birth))
        .unwrap_or(0)
}

pub fn age_today(date_of_birth: &str) -> u32 {
    age_on(date_of_birth, Local::now().date_naive())
}

/// Filters and orders `records` for display.
///
/// An empty `search_text` matches everything; otherwise it must appear,
/// ignoring case, in the stage name or the group. `group_filter` of `None`
/// (or an empty string) admits every group, anything else must equal the
/// record's group exactly. Ordering is stable.
pub fn query(
    records: &[ArtistRecord],
    search_text: &str,
    group_filter: Option<&str>,
    sort_key: SortKey,
) -> Vec<ArtistRecord> {
    let needle = search_text.to_lowercase();
    let group_filter = group_filter.filter(|group| !group.is_empty());

    let mut view: Vec<ArtistRecord> = records
        .iter()
        .filter(|record| {
            let matches_search = needle.is_empty()
                || record.stage_name.to_lowercase().contains(&needle)
                || record.group.to_lowercase().contains(&needle);
            let matches_group = group_filter.is_none_or(|group| record.group == group);
            matches_search && matches_group
        })
        .cloned()
        .collect();

    match sort_key {
        SortKey::Name => view.sort_by(|a, b| a.stage_name.cmp(&b.stage_name)),
        SortKey::Group => view.sort_by(|a, b| a.group.cmp(&b.group)),
        SortKey::Age => view.sort_by_cached_key(|record| parse_date_of_birth(&record.date_of_birth)),
    }

    view
}

pub fn query_state(records: &[ArtistRecord], state: &QueryState) -> Vec<ArtistRecord> {
    query(
        records,
        &state.search_text,
        state.group_filter.as_deref(),
        state.sort_key,
    )
}

/// Unique group values in ascending order.
pub fn distinct_groups(records: &[ArtistRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.group.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stage_name: &str, date_of_birth: &str, group: &str) -> ArtistRecord {
        ArtistRecord {
            stage_name: stage_name.to_string(),
            full_name: String::new(),
            korean_name: String::new(),
            date_of_birth: date_of_birth.to_string(),
            country: "South Korea".to_string(),
            group: group.to_string(),
            gender: "F".to_string(),
        }
    }

    fn sample() -> Vec<ArtistRecord> {
        vec![
            record("Jisoo", "03/01/1995", "BLACKPINK"),
            record("Jin", "04/12/1992", "BTS"),
            record("Winter", "01/01/2001", "aespa"),
            record("Lisa", "27/03/1997", "BLACKPINK"),
            record("Mystery", "not-a-date", "Solo"),
            record("Felix", "15/09/2000", "Stray Kids"),
        ]
    }

    fn names(view: &[ArtistRecord]) -> Vec<&str> {
        view.iter().map(|r| r.stage_name.as_str()).collect()
    }

    #[test]
    fn empty_query_sorts_everything_by_name() {
        let view = query(&sample(), "", None, SortKey::Name);
        assert_eq!(
            names(&view),
            ["Felix", "Jin", "Jisoo", "Lisa", "Mystery", "Winter"]
        );
    }

    #[test]
    fn name_sort_is_case_sensitive() {
        let records = vec![
            record("aespa fan", "01/01/2000", "Solo"),
            record("Zico", "01/01/2000", "Solo"),
        ];
        let view = query(&records, "", None, SortKey::Name);
        assert_eq!(names(&view), ["Zico", "aespa fan"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_group() {
        let view = query(&sample(), "bl", None, SortKey::Name);
        assert_eq!(names(&view), ["Jisoo", "Lisa"]);

        let view = query(&sample(), "WIN", None, SortKey::Name);
        assert_eq!(names(&view), ["Winter"]);
    }

    #[test]
    fn group_filter_is_exact() {
        let view = query(&sample(), "", Some("BLACKPINK"), SortKey::Name);
        assert_eq!(names(&view), ["Jisoo", "Lisa"]);

        assert!(query(&sample(), "", Some("blackpink"), SortKey::Name).is_empty());
        assert!(query(&sample(), "", Some("BLACK"), SortKey::Name).is_empty());
    }

    #[test]
    fn empty_group_filter_means_all_groups() {
        assert_eq!(query(&sample(), "", Some(""), SortKey::Name).len(), sample().len());
    }

    #[test]
    fn search_and_group_filter_combine() {
        let view = query(&sample(), "li", Some("BLACKPINK"), SortKey::Name);
        assert_eq!(names(&view), ["Lisa"]);
        assert!(query(&sample(), "jin", Some("BLACKPINK"), SortKey::Name).is_empty());
    }

    #[test]
    fn age_sort_puts_oldest_first_with_sentinel_for_bad_dates() {
        let view = query(&sample(), "", None, SortKey::Age);
        assert_eq!(
            names(&view),
            ["Jin", "Jisoo", "Lisa", "Mystery", "Felix", "Winter"]
        );
    }

    #[test]
    fn group_sort_is_stable() {
        let view = query(&sample(), "", None, SortKey::Group);
        assert_eq!(
            names(&view),
            ["Jisoo", "Lisa", "Jin", "Mystery", "Felix", "Winter"]
        );
    }

    #[test]
    fn sort_key_never_changes_membership() {
        let records = sample();
        let mut expected = names(&query(&records, "i", None, SortKey::Name))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        expected.sort();

        for key in SortKey::ALL {
            let mut got = names(&query(&records, "i", None, key))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>();
            got.sort();
            assert_eq!(got, expected, "membership changed for {key}");
        }
    }

    #[test]
    fn query_is_idempotent() {
        let records = sample();
        let state = QueryState {
            search_text: "s".to_string(),
            group_filter: None,
            sort_key: SortKey::Age,
        };
        assert_eq!(query_state(&records, &state), query_state(&records, &state));
    }

    #[test]
    fn unparseable_dates_use_sentinel() {
        assert_eq!(parse_date_of_birth("not-a-date"), sentinel_date());
        assert_eq!(parse_date_of_birth("1995-01-03"), sentinel_date());
        assert_eq!(parse_date_of_birth("03/01/95"), sentinel_date());
        assert_eq!(parse_date_of_birth("3/1/1995"), sentinel_date());
        assert_eq!(parse_date_of_birth("03/01/+1995"), sentinel_date());
        assert_eq!(parse_date_of_birth("31/02/1995"), sentinel_date());
        assert_eq!(
            parse_date_of_birth("03/01/1995"),
            NaiveDate::from_ymd_opt(1995, 1, 3).expect("valid date")
        );
    }

    #[test]
    fn sentinel_is_first_of_january_2000() {
        assert_eq!(
            sentinel_date(),
            NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date")
        );
        assert_eq!(age_on("03/01/95", NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")), 24);
    }

    #[test]
    fn age_counts_whole_years() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        assert_eq!(age_on("03/01/1995", today), 28);
        assert_eq!(age_on("02/01/1995", today), 29);
        assert_eq!(age_on("not-a-date", today), 24);
        assert_eq!(age_on("01/01/2030", today), 0);
    }

    #[test]
    fn distinct_groups_are_sorted_and_unique() {
        assert_eq!(
            distinct_groups(&sample()),
            ["BLACKPINK", "BTS", "Solo", "Stray Kids", "aespa"]
        );
        assert!(distinct_groups(&[]).is_empty());
    }
}
