//! Filter parsing and parameterized SELECT construction.

/// Filter values for the vehicle list query.
///
/// Values within one field OR together (membership test); distinct fields
/// AND together (intersection). Values are kept verbatim: no trimming, no
/// validation. A value that cannot match anything, e.g. a non-numeric year,
/// simply selects zero rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub years: Vec<String>,
    pub manufacturers: Vec<String>,
}

impl VehicleFilter {
    /// Build a filter from raw query parameters, comma-splitting each one.
    ///
    /// A missing or empty-string parameter leaves that field unconstrained
    /// (clients send empty strings for unset filter controls).
    pub fn from_params(year: Option<&str>, manufacturer: Option<&str>) -> Self {
        Self {
            years: split_param(year),
            manufacturers: split_param(manufacturer),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.years.is_empty() && self.manufacturers.is_empty()
    }
}

fn split_param(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Accumulates a SELECT statement and its bound values in lockstep, so a
/// predicate fragment can never reach the SQL text without its parameters.
/// Column names are compile-time constants; user-supplied values only ever
/// appear as binds.
#[derive(Debug)]
pub(crate) struct SelectBuilder {
    sql: String,
    binds: Vec<String>,
}

impl SelectBuilder {
    /// Start from a base statement ending in an always-true predicate
    /// (`... WHERE 1=1`) so every fragment can append with `AND`.
    pub fn new(base: &str) -> Self {
        Self {
            sql: base.to_string(),
            binds: Vec::new(),
        }
    }

    /// Append ` AND column IN (?, ...)` with one placeholder per value and
    /// push the values onto the bind list in the same order. No-op for an
    /// empty value list.
    pub fn push_membership(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let placeholders = values.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        self.sql.push_str(" AND ");
        self.sql.push_str(column);
        self.sql.push_str(" IN (");
        self.sql.push_str(&placeholders);
        self.sql.push(')');
        self.binds.extend(values.iter().cloned());
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.sql, self.binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- from_params tests ---

    #[test]
    fn from_params_absent() {
        let filter = VehicleFilter::from_params(None, None);
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn from_params_empty_string_means_unconstrained() {
        let filter = VehicleFilter::from_params(Some(""), Some(""));
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn from_params_single_values() {
        let filter = VehicleFilter::from_params(Some("2021"), Some("Acme"));
        assert_eq!(filter.years, vec!["2021"]);
        assert_eq!(filter.manufacturers, vec!["Acme"]);
    }

    #[test]
    fn from_params_comma_lists() {
        let filter = VehicleFilter::from_params(Some("2021,2022"), Some("Acme,Globex"));
        assert_eq!(filter.years, vec!["2021", "2022"]);
        assert_eq!(filter.manufacturers, vec!["Acme", "Globex"]);
    }

    #[test]
    fn from_params_values_are_not_trimmed() {
        let filter = VehicleFilter::from_params(None, Some("Acme, Globex"));
        assert_eq!(filter.manufacturers, vec!["Acme", " Globex"]);
    }

    #[test]
    fn from_params_trailing_comma_keeps_empty_value() {
        let filter = VehicleFilter::from_params(Some("2021,"), None);
        assert_eq!(filter.years, vec!["2021", ""]);
    }

    // --- SelectBuilder tests ---

    const BASE: &str = "SELECT * FROM vehicles WHERE 1=1";

    fn values(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn builder_without_fragments_is_base() {
        let (sql, binds) = SelectBuilder::new(BASE).into_parts();
        assert_eq!(sql, BASE);
        assert!(binds.is_empty());
    }

    #[test]
    fn builder_membership_single_value() {
        let mut select = SelectBuilder::new(BASE);
        select.push_membership("model_year", &values(&["2021"]));
        let (sql, binds) = select.into_parts();
        assert_eq!(sql, "SELECT * FROM vehicles WHERE 1=1 AND model_year IN (?)");
        assert_eq!(binds, values(&["2021"]));
    }

    #[test]
    fn builder_membership_multiple_values() {
        let mut select = SelectBuilder::new(BASE);
        select.push_membership("manufacturer", &values(&["Acme", "Globex"]));
        let (sql, binds) = select.into_parts();
        assert_eq!(
            sql,
            "SELECT * FROM vehicles WHERE 1=1 AND manufacturer IN (?, ?)"
        );
        assert_eq!(binds, values(&["Acme", "Globex"]));
    }

    #[test]
    fn builder_empty_values_appends_nothing() {
        let mut select = SelectBuilder::new(BASE);
        select.push_membership("model_year", &[]);
        let (sql, binds) = select.into_parts();
        assert_eq!(sql, BASE);
        assert!(binds.is_empty());
    }

    #[test]
    fn builder_fragments_and_binds_stay_in_lockstep() {
        let mut select = SelectBuilder::new(BASE);
        select.push_membership("model_year", &values(&["2021", "2022"]));
        select.push_membership("manufacturer", &values(&["Acme"]));
        let (sql, binds) = select.into_parts();
        assert_eq!(
            sql,
            "SELECT * FROM vehicles WHERE 1=1 AND model_year IN (?, ?) AND manufacturer IN (?)"
        );
        assert_eq!(binds, values(&["2021", "2022", "Acme"]));
        assert_eq!(sql.matches('?').count(), binds.len());
    }

    #[test]
    fn builder_never_interpolates_values() {
        // An injection attempt stays a bound value, never SQL text.
        let mut select = SelectBuilder::new(BASE);
        select.push_membership("manufacturer", &values(&["x'); DROP TABLE vehicles; --"]));
        let (sql, binds) = select.into_parts();
        assert!(!sql.contains("DROP TABLE"));
        assert_eq!(binds, values(&["x'); DROP TABLE vehicles; --"]));
    }
}
