use super::errors::ConfigError;
use super::file::FilterEntry;
use crate::filter::{FilterRule, FilterSet, FilterType, MatchMode};

/// Builds the rule set from configured entries, in configuration order.
///
/// Entries without a usable host are skipped. A type-specific rule must name
/// its matching mode; `ALL` rules ignore it.
pub(crate) fn parse_filters(entries: Option<Vec<FilterEntry>>) -> Result<FilterSet, ConfigError> {
    let Some(entries) = entries else {
        return Ok(FilterSet::default());
    };

    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(host) = entry.host else {
            continue;
        };
        if host.len() < FilterRule::MIN_HOST_LEN {
            continue;
        }

        let filter_type = match entry.filter_type {
            None => FilterType::All,
            Some(raw) => raw
                .parse::<FilterType>()
                .map_err(|_| ConfigError::InvalidFilterType {
                    filter_type: raw,
                    host: host.clone(),
                })?,
        };

        let mode = match filter_type {
            FilterType::All => MatchMode::Contains,
            FilterType::Only(_) => match entry.matching {
                None => return Err(ConfigError::MissingMatching { host }),
                Some(matching) => match matching.parse::<MatchMode>() {
                    Ok(mode) => mode,
                    Err(_) => return Err(ConfigError::InvalidMatching { matching, host }),
                },
            },
        };

        rules.push(FilterRule::new(host, filter_type, mode));
    }

    Ok(FilterSet::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordType;

    fn entry(host: &str, filter_type: Option<&str>, matching: Option<&str>) -> FilterEntry {
        FilterEntry {
            host: Some(host.to_string()),
            filter_type: filter_type.map(str::to_string),
            matching: matching.map(str::to_string),
        }
    }

    #[test]
    fn test_no_filters_is_empty_set() {
        assert!(parse_filters(None).unwrap().is_empty());
    }

    #[test]
    fn test_type_defaults_to_all_without_matching() {
        let set = parse_filters(Some(vec![entry("ads.example.com", None, None)])).unwrap();
        let rule = set.iter().next().unwrap();
        assert_eq!(rule.filter_type(), FilterType::All);
        assert_eq!(rule.mode(), MatchMode::Contains);
    }

    #[test]
    fn test_all_ignores_matching() {
        let set =
            parse_filters(Some(vec![entry("ads.example.com", Some("ALL"), Some("exact"))]))
                .unwrap();
        assert!(!set.iter().next().unwrap().is_exact());
    }

    #[test]
    fn test_short_or_missing_hosts_are_dropped() {
        let set = parse_filters(Some(vec![
            entry("a.b", None, None),
            FilterEntry::default(),
            entry("a.io", Some("A"), Some("exact")),
        ]))
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().host(), "a.io");
    }

    #[test]
    fn test_typed_rule_keeps_mode() {
        let set = parse_filters(Some(vec![
            entry("tracker.net", Some("AAAA"), Some("contains")),
            entry("example.com", Some("MX"), Some("exact")),
        ]))
        .unwrap();
        let rules: Vec<_> = set.iter().collect();
        assert_eq!(rules[0].filter_type(), FilterType::Only(RecordType::AAAA));
        assert_eq!(rules[0].mode(), MatchMode::Contains);
        assert_eq!(rules[1].filter_type(), FilterType::Only(RecordType::MX));
        assert!(rules[1].is_exact());
    }

    #[test]
    fn test_typed_rule_without_matching_is_fatal() {
        let err = parse_filters(Some(vec![entry("example.com", Some("A"), None)])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingMatching { host } if host == "example.com"));
    }

    #[test]
    fn test_invalid_matching_is_fatal() {
        let err = parse_filters(Some(vec![entry("example.com", Some("A"), Some("prefix"))]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMatching { matching, .. } if matching == "prefix"));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let err = parse_filters(Some(vec![entry("example.com", Some("HINFO"), Some("exact"))]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilterType { .. }));
    }
}
