//! Per-entity allow-lists of filterable and sortable columns.

/// Storage type of a column, used to coerce incoming filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Timestamp,
    /// UUID persisted as lower-case hyphenated text.
    Uuid,
}

/// How a field may be constrained by a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Single value compared with `=`.
    Equality,
    /// Exact value or a lower and/or upper bound.
    Range,
    /// One value or a list of accepted values.
    Set,
}

/// Which part of a field a filter key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// Mapping of one API field onto a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Name used by API callers (camelCase).
    pub name: &'static str,
    pub column: &'static str,
    pub column_type: ColumnType,
    /// `None` for fields that can only be sorted on.
    pub filter: Option<FilterKind>,
    pub sortable: bool,
    /// Canonical spellings accepted for enumerated text columns.
    pub values: Option<&'static [&'static str]>,
    /// Text is stored trimmed and upper-cased, so filter values are too.
    pub upper_case: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column,
            column_type,
            filter: None,
            sortable: false,
            values: None,
            upper_case: false,
        }
    }

    pub const fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.values = Some(values);
        self
    }

    pub const fn upper_case(mut self) -> Self {
        self.upper_case = true;
        self
    }
}

/// Filter key resolved against a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterTarget<'a> {
    pub field: &'a FieldDef,
    pub kind: FilterKind,
    pub bound: Bound,
}

const LOWER_SUFFIXES: [&str; 2] = ["Min", "From"];
const UPPER_SUFFIXES: [&str; 2] = ["Max", "To"];

/// Static description of an entity's table as seen by the query engine.
///
/// Column names used in generated SQL only ever come from here.
#[derive(Debug)]
pub struct FieldRegistry {
    table: &'static str,
    primary_key: &'static str,
    fields: &'static [FieldDef],
}

impl FieldRegistry {
    pub const fn new(
        table: &'static str,
        primary_key: &'static str,
        fields: &'static [FieldDef],
    ) -> Self {
        Self {
            table,
            primary_key,
            fields,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Looks a field up by its API name, ignoring ASCII case.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn sort_field(&self, name: &str) -> Option<&'static FieldDef> {
        self.field(name).filter(|field| field.sortable)
    }

    /// Resolves a filter key to its field.
    ///
    /// Range fields additionally answer to `<name>Min`/`<name>From` for the
    /// lower bound and `<name>Max`/`<name>To` for the upper bound.
    pub fn resolve_filter(&self, key: &str) -> Option<FilterTarget<'static>> {
        if let Some((field, kind)) = self
            .field(key)
            .and_then(|field| field.filter.map(|kind| (field, kind)))
        {
            return Some(FilterTarget {
                field,
                kind,
                bound: Bound::Exact,
            });
        }

        let suffixed = LOWER_SUFFIXES
            .iter()
            .map(|suffix| (*suffix, Bound::Lower))
            .chain(UPPER_SUFFIXES.iter().map(|suffix| (*suffix, Bound::Upper)));

        for (suffix, bound) in suffixed {
            let Some(base) = strip_suffix_ignore_case(key, suffix) else {
                continue;
            };
            let range_field = self
                .field(base)
                .filter(|field| field.filter == Some(FilterKind::Range));
            if let Some(field) = range_field {
                return Some(FilterTarget {
                    field,
                    kind: FilterKind::Range,
                    bound,
                });
            }
        }

        None
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if split == 0 || !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
