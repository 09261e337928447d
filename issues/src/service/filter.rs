use common::{
    entities::issue::{CREATED_ON, ID, OPEN, PROJECT_NAME, UPDATED_ON},
    normalize_timestamp,
};
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::fields;

/// Converts a query-string value into the type the field is stored with.
///
/// | Field                      | Stored as          | Accepted input      |
/// |----------------------------|--------------------|---------------------|
/// | `open`                     | boolean            | same as updates     |
/// | `created_on`, `updated_on` | canonical time     | any RFC 3339 time   |
/// | `_id`                      | object id          | 24 hex characters   |
/// | anything else              | string             | verbatim            |
///
/// Input outside the accepted form stays a string, which matches no stored
/// record of that field.
pub fn coerce(field: &str, value: String) -> Bson {
    match field {
        OPEN => match fields::flag_text(&value) {
            Some(open) => Bson::Boolean(open),
            None => Bson::String(value),
        },
        CREATED_ON | UPDATED_ON => {
            Bson::String(normalize_timestamp(&value).unwrap_or(value))
        }
        ID => ObjectId::parse_str(&value)
            .map(Bson::ObjectId)
            .unwrap_or(Bson::String(value)),
        _ => Bson::String(value),
    }
}

/// Equality filter for a project's issues.
///
/// Every query parameter adds one constraint. Returns `None` when two
/// constraints on the same field disagree, since no record can satisfy both,
/// and when a parameter name is a query operator (`$where`, `$expr`, ...),
/// since no stored field name starts with `$`.
pub fn build_filter(project: &str, query: Vec<(String, String)>) -> Option<Document> {
    let mut filter = Document::new();
    filter.insert(PROJECT_NAME, project);

    for (field, value) in query {
        if field.starts_with('$') {
            return None;
        }
        let value = coerce(&field, value);
        match filter.get(&field).cloned() {
            Some(existing) if existing != value => return None,
            Some(_) => {}
            None => {
                filter.insert(field, value);
            }
        }
    }

    Some(filter)
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn project_alone() {
        assert_eq!(
            build_filter("apitest", vec![]),
            Some(doc! {"project_name": "apitest"})
        );
    }

    #[test]
    fn booleans_are_coerced() {
        let filter = build_filter(
            "apitest",
            query(&[("open", "false"), ("issue_title", "HELLO")]),
        )
        .unwrap();
        assert_eq!(
            filter,
            doc! {"project_name": "apitest", "open": false, "issue_title": "HELLO"}
        );
    }

    #[test]
    fn booleans_accept_the_update_spellings() {
        assert_eq!(coerce("open", "0".to_string()), Bson::Boolean(false));
        assert_eq!(coerce("open", "no".to_string()), Bson::Boolean(false));
        assert_eq!(coerce("open", "1".to_string()), Bson::Boolean(true));
        assert_eq!(coerce("open", "yes".to_string()), Bson::Boolean(true));
    }

    #[test]
    fn dollar_fields_match_nothing() {
        for operator in ["$where", "$expr", "$text", "$comment"] {
            assert_eq!(build_filter("p", query(&[(operator, "sleep(5000)")])), None);
        }
        assert_eq!(
            build_filter("p", query(&[("open", "true"), ("$where", "1")])),
            None
        );
    }

    #[test]
    fn unrecognised_boolean_stays_a_string() {
        assert_eq!(
            coerce("open", "sometimes".to_string()),
            Bson::String("sometimes".to_string())
        );
    }

    #[test]
    fn dates_are_normalized() {
        assert_eq!(
            coerce("created_on", "2024-08-07T17:30:00Z".to_string()),
            Bson::String("2024-08-07T17:30:00.000Z".to_string())
        );
        assert_eq!(
            coerce("updated_on", "last week".to_string()),
            Bson::String("last week".to_string())
        );
    }

    #[test]
    fn ids_are_parsed_when_well_formed() {
        let id = ObjectId::new();
        assert_eq!(coerce("_id", id.to_hex()), Bson::ObjectId(id));
        assert_eq!(coerce("_id", "42".to_string()), Bson::String("42".to_string()));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let filter = build_filter("p", query(&[("severity", "high")])).unwrap();
        assert_eq!(filter.get_str("severity").unwrap(), "high");
    }

    #[test]
    fn conflicting_project_matches_nothing() {
        assert_eq!(build_filter("a", query(&[("project_name", "b")])), None);
        assert!(build_filter("a", query(&[("project_name", "a")])).is_some());
    }

    #[test]
    fn repeated_parameters_must_agree() {
        assert_eq!(
            build_filter("a", query(&[("open", "true"), ("open", "false")])),
            None
        );
    }
}
