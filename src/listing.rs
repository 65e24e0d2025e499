use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

/// Columns accepted in a dynamically built ORDER BY clause. Anything else
/// falls back to `created_at`; the clause itself cannot be parameterized.
const SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "name"];

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

fn sort_column(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|c| SORT_COLUMNS.iter().find(|s| **s == c))
        .copied()
        .unwrap_or("created_at")
}

fn sort_order(requested: Option<&str>) -> &'static str {
    match requested {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

/// List-valued columns are stored as JSON-serialized arrays of strings.
/// Encoding and decoding happen only at the repository edge.
pub fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}

/// Malformed stored text degrades to an empty list rather than failing
/// the request.
pub fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// LIKE pattern matching one element of a serialized list column. Relies
/// on the `encode_list` representation quoting every element.
fn contains_pattern(value: &str) -> String {
    format!("%\"{}\"%", value)
}

#[derive(Debug, Clone)]
enum Filter {
    /// Substring match against a serialized list column.
    ListContains {
        column: &'static str,
        value: String,
    },
    /// Exact match.
    Equals {
        column: &'static str,
        value: String,
    },
    /// Boolean flag; the query value "true" maps to true, anything else
    /// to false.
    Flag {
        column: &'static str,
        value: bool,
    },
}

/// Builds the filtered, sorted, paginated page query and the matching
/// count query for a list endpoint. Both share the identical predicate
/// list so the reported total is consistent with the returned page.
/// Filter values are always bound parameters; only the allow-listed sort
/// column/direction and the static skeleton are string-composed.
#[derive(Debug, Clone)]
pub struct ListQuery {
    table: &'static str,
    filters: Vec<Filter>,
    sort_column: &'static str,
    sort_order: &'static str,
    page: i64,
    limit: i64,
}

impl ListQuery {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            filters: Vec::new(),
            sort_column: "created_at",
            sort_order: "DESC",
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn list_contains(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.filters.push(Filter::ListContains { column, value });
        }
        self
    }

    pub fn equals(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.filters.push(Filter::Equals { column, value });
        }
        self
    }

    pub fn flag(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.filters.push(Filter::Flag {
                column,
                value: value == "true",
            });
        }
        self
    }

    pub fn sort(mut self, column: Option<&str>, order: Option<&str>) -> Self {
        self.sort_column = sort_column(column);
        self.sort_order = sort_order(order);
        self
    }

    pub fn paginate(mut self, page: i64, limit: i64) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    fn push_filters<'a>(&'a self, qb: &mut QueryBuilder<'a, Postgres>) {
        for filter in &self.filters {
            match filter {
                Filter::ListContains { column, value } => {
                    qb.push(" AND ");
                    qb.push(column);
                    qb.push(" LIKE ");
                    qb.push_bind(contains_pattern(value));
                }
                Filter::Equals { column, value } => {
                    qb.push(" AND ");
                    qb.push(column);
                    qb.push(" = ");
                    qb.push_bind(value.as_str());
                }
                Filter::Flag { column, value } => {
                    qb.push(" AND ");
                    qb.push(column);
                    qb.push(" = ");
                    qb.push_bind(*value);
                }
            }
        }
    }

    pub fn select(&self) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE 1=1", self.table));
        self.push_filters(&mut qb);
        qb.push(" ORDER BY ");
        qb.push(self.sort_column);
        qb.push(" ");
        qb.push(self.sort_order);
        qb.push(" LIMIT ");
        qb.push_bind(self.limit);
        qb.push(" OFFSET ");
        qb.push_bind(self.offset());
        qb
    }

    pub fn count(&self) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE 1=1", self.table));
        self.push_filters(&mut qb);
        qb
    }
}

/// Pagination metadata echoed back on list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_falls_back_outside_allow_list() {
        assert_eq!(sort_column(Some("created_at")), "created_at");
        assert_eq!(sort_column(Some("updated_at")), "updated_at");
        assert_eq!(sort_column(Some("name")), "name");
        assert_eq!(sort_column(Some("id; DROP TABLE projects")), "created_at");
        assert_eq!(sort_column(Some("owner_id")), "created_at");
        assert_eq!(sort_column(None), "created_at");
    }

    #[test]
    fn sort_order_normalizes_to_asc_or_desc() {
        assert_eq!(sort_order(Some("ASC")), "ASC");
        assert_eq!(sort_order(Some("asc")), "ASC");
        assert_eq!(sort_order(Some("DESC")), "DESC");
        assert_eq!(sort_order(Some("descending")), "DESC");
        assert_eq!(sort_order(Some("sideways")), "DESC");
        assert_eq!(sort_order(None), "DESC");
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let q = ListQuery::new("projects").paginate(1, 10);
        assert_eq!(q.offset(), 0);
        let q = ListQuery::new("projects").paginate(3, 25);
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn select_sql_binds_every_filter_value() {
        let q = ListQuery::new("projects")
            .list_contains("languages", Some("TypeScript".into()))
            .equals("status", Some("open".into()))
            .flag("is_paid", Some("true"))
            .sort(Some("name"), Some("asc"))
            .paginate(2, 5);

        let sql = q.select().into_sql();
        assert_eq!(
            sql,
            "SELECT * FROM projects WHERE 1=1 AND languages LIKE $1 \
             AND status = $2 AND is_paid = $3 ORDER BY name ASC LIMIT $4 OFFSET $5"
        );
        // The filter values never appear in the query text.
        assert!(!sql.contains("TypeScript"));
        assert!(!sql.contains("open"));
    }

    #[test]
    fn count_sql_shares_the_filter_predicates() {
        let q = ListQuery::new("maintainers")
            .list_contains("skills", Some("Rust".into()))
            .equals("availability", Some("volunteer".into()));

        assert_eq!(
            q.count().into_sql(),
            "SELECT COUNT(*) FROM maintainers WHERE 1=1 AND skills LIKE $1 AND availability = $2"
        );
    }

    #[test]
    fn absent_filters_are_omitted() {
        let q = ListQuery::new("maintainers")
            .list_contains("skills", None)
            .equals("availability", None)
            .flag("interested_in_paid", None);

        assert_eq!(
            q.select().into_sql(),
            "SELECT * FROM maintainers WHERE 1=1 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn flag_maps_only_true_string_to_true() {
        for (raw, expected) in [("true", true), ("false", false), ("1", false), ("TRUE", false)] {
            let q = ListQuery::new("projects").flag("is_paid", Some(raw));
            match &q.filters[0] {
                Filter::Flag { value, .. } => assert_eq!(*value, expected, "input {raw:?}"),
                other => panic!("unexpected filter {other:?}"),
            }
        }
    }

    #[test]
    fn contains_pattern_quotes_the_element() {
        assert_eq!(contains_pattern("TypeScript"), "%\"TypeScript\"%");
    }

    #[test]
    fn list_codec_round_trips_preserving_order() {
        let values = vec!["TypeScript".to_string(), "JavaScript".to_string()];
        let encoded = encode_list(&values);
        assert_eq!(encoded, r#"["TypeScript","JavaScript"]"#);
        assert_eq!(decode_list(&encoded), values);
    }

    #[test]
    fn malformed_stored_list_degrades_to_empty() {
        assert_eq!(decode_list("not json"), Vec::<String>::new());
        assert_eq!(decode_list("{\"a\":1}"), Vec::<String>::new());
        assert_eq!(decode_list(""), Vec::<String>::new());
    }

    #[test]
    fn total_pages_is_ceil_of_total_over_limit() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 3, 10).total_pages, 4);
    }

    #[test]
    fn total_pages_guards_against_zero_limit() {
        assert_eq!(Pagination::new(1, 0, 42).total_pages, 0);
    }

    #[test]
    fn pagination_echoes_the_requested_page() {
        let p = Pagination::new(99, 10, 3);
        assert_eq!(p.page, 99);
        assert_eq!(p.limit, 10);
        assert_eq!(p.total, 3);
    }

    #[test]
    fn pagination_serializes_total_pages_as_camel_case() {
        let v = serde_json::to_value(Pagination::new(1, 5, 12)).expect("serialize");
        assert_eq!(v["page"], 1);
        assert_eq!(v["limit"], 5);
        assert_eq!(v["total"], 12);
        assert_eq!(v["totalPages"], 3);
    }
}
