//! Dynamic filtering and pagination
//!
//! Every filter endpoint accepts a [`FilterRequest`]: a list of criteria over
//! named fields plus pagination parameters. Requests arrive as untyped JSON,
//! so before reaching storage they are checked against the entity's field
//! schema ([`FieldDef`]) and turned into a typed [`FilterQuery`]. Storage
//! adapters only ever see validated queries:
//!
//! - the PostgreSQL adapter renders a `FilterQuery` into SQL
//! - the in-memory adapter evaluates it with [`FilterQuery::matches`]
//!
//! # Example
//!
//! ```rust
//! use core_kernel::filter::{FieldDef, FieldKind, FilterCriterion, FilterRequest};
//!
//! static FIELDS: &[FieldDef] = &[
//!     FieldDef::new("id", FieldKind::Uuid),
//!     FieldDef::new("city", FieldKind::Text),
//!     FieldDef::new("created_at", FieldKind::Timestamp),
//! ];
//!
//! let request = FilterRequest::new()
//!     .with(FilterCriterion::equals("city", "Madrid"))
//!     .page(0, 20);
//!
//! let query = request.validate(FIELDS).unwrap();
//! assert_eq!(query.limit(), 20);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Page size used when the request does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a single request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Field used for ordering when the request does not name one
pub const DEFAULT_SORT_FIELD: &str = "created_at";

// ============================================================================
// Field schema
// ============================================================================

/// Storage type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Uuid,
    Text,
    Bool,
    Date,
    Timestamp,
    Decimal,
    Integer,
}

impl FieldKind {
    /// Returns the lowercase name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Uuid => "uuid",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Date => "date",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Decimal => "decimal",
            FieldKind::Integer => "integer",
        }
    }

    /// Whether values of this kind have a meaningful order
    pub fn is_ordered(&self) -> bool {
        !matches!(self, FieldKind::Uuid | FieldKind::Bool)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed field of an entity
///
/// The name is simultaneously the JSON property, the filter field and the
/// storage column, so schemas are declared once per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Looks up a field by name, returning its position in the schema
pub fn field_index(fields: &[FieldDef], name: &str) -> Option<usize> {
    fields.iter().position(|f| f.name == name)
}

// ============================================================================
// Field values
// ============================================================================

/// A typed value of an entity field
///
/// Entities expose their state as a `Vec<FieldValue>` aligned with their
/// field schema; criteria operands are converted into the same type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Decimal(Decimal),
    Integer(i64),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Converts a JSON operand into a value of the given kind
    ///
    /// Dates use `YYYY-MM-DD`, timestamps RFC 3339. Decimals may be given as
    /// JSON numbers or strings.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::TypeMismatch` if the JSON value cannot represent
    /// the field kind (including JSON `null`).
    pub fn from_json(field: &FieldDef, value: &Value) -> Result<Self, FilterError> {
        let mismatch = || FilterError::TypeMismatch {
            field: field.name.to_string(),
            expected: field.kind,
        };

        let converted = match (field.kind, value) {
            (FieldKind::Uuid, Value::String(s)) => {
                FieldValue::Uuid(Uuid::parse_str(s).map_err(|_| mismatch())?)
            }
            (FieldKind::Text, Value::String(s)) => FieldValue::Text(s.clone()),
            (FieldKind::Bool, Value::Bool(b)) => FieldValue::Bool(*b),
            (FieldKind::Date, Value::String(s)) => FieldValue::Date(
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| mismatch())?,
            ),
            (FieldKind::Timestamp, Value::String(s)) => FieldValue::Timestamp(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|_| mismatch())?
                    .with_timezone(&Utc),
            ),
            (FieldKind::Decimal, Value::Number(n)) => {
                FieldValue::Decimal(parse_decimal(&n.to_string()).ok_or_else(mismatch)?)
            }
            (FieldKind::Decimal, Value::String(s)) => {
                FieldValue::Decimal(parse_decimal(s).ok_or_else(mismatch)?)
            }
            (FieldKind::Integer, Value::Number(n)) => {
                FieldValue::Integer(n.as_i64().ok_or_else(mismatch)?)
            }
            _ => return Err(mismatch()),
        };

        Ok(converted)
    }

    /// Orders two values of the same kind; `None` for nulls or mixed kinds
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

// ============================================================================
// Request contract
// ============================================================================

/// Comparison applied by a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Case-insensitive substring match (text fields only)
    Contains,
    /// Case-insensitive prefix match (text fields only)
    StartsWith,
    /// Matches any value of a non-empty JSON array
    In,
    IsNull,
    IsNotNull,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::NotEquals => "NOT_EQUALS",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::StartsWith => "STARTS_WITH",
            FilterOperator::In => "IN",
            FilterOperator::IsNull => "IS_NULL",
            FilterOperator::IsNotNull => "IS_NOT_NULL",
        }
    }

    /// Whether the operator compares against an operand
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }

    fn is_ordering(&self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterThan
                | FilterOperator::GreaterThanOrEqual
                | FilterOperator::LessThan
                | FilterOperator::LessThanOrEqual
        )
    }

    fn is_pattern(&self) -> bool {
        matches!(self, FilterOperator::Contains | FilterOperator::StartsWith)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One condition over one field, as received over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FilterCriterion {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Equals, Some(value.into()))
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, Some(Value::String(value.into())))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNull, None)
    }
}

/// Sort direction for paged results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Paging and ordering parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    /// Zero-based page index
    #[serde(default)]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_direction: SortDirection::default(),
        }
    }
}

/// A filter specification: criteria joined by AND, plus pagination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
    #[serde(default)]
    pub pagination: PaginationRequest,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion
    pub fn with(mut self, criterion: FilterCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    /// Sets the requested page
    pub fn page(mut self, page_number: u32, page_size: u32) -> Self {
        self.pagination.page_number = page_number;
        self.pagination.page_size = page_size;
        self
    }

    /// Sets the ordering
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.pagination.sort_by = Some(field.into());
        self.pagination.sort_direction = direction;
        self
    }

    /// Checks the request against an entity's field schema
    ///
    /// # Arguments
    ///
    /// * `fields` - The entity's filterable fields
    ///
    /// # Returns
    ///
    /// A typed query ready for a storage adapter
    ///
    /// # Errors
    ///
    /// Returns a `FilterError` describing the first malformed part of the request
    pub fn validate(&self, fields: &[FieldDef]) -> Result<FilterQuery, FilterError> {
        let pagination = &self.pagination;
        if pagination.page_size == 0 || pagination.page_size > MAX_PAGE_SIZE {
            return Err(FilterError::InvalidPageSize(pagination.page_size));
        }

        let predicates = self
            .filters
            .iter()
            .map(|criterion| Predicate::build(criterion, fields))
            .collect::<Result<Vec<_>, _>>()?;

        let sort_index = match pagination.sort_by.as_deref() {
            Some(name) => field_index(fields, name)
                .ok_or_else(|| FilterError::UnknownSortField(name.to_string()))?,
            None => field_index(fields, DEFAULT_SORT_FIELD).unwrap_or(0),
        };

        Ok(FilterQuery {
            predicates,
            page_number: pagination.page_number,
            page_size: pagination.page_size,
            sort_index,
            sort_field: fields.get(sort_index).copied(),
            sort_direction: pagination.sort_direction,
            tiebreak_index: field_index(fields, "id"),
        })
    }
}

/// Reasons a filter request is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),

    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("operator {operator} on '{field}' requires a value")]
    MissingValue { field: String, operator: FilterOperator },

    #[error("operator {operator} on '{field}' does not take a value")]
    UnexpectedValue { field: String, operator: FilterOperator },

    #[error("value for '{field}' must be of type {expected}")]
    TypeMismatch { field: String, expected: FieldKind },

    #[error("operator {operator} is not supported on {kind} field '{field}'")]
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        kind: FieldKind,
    },

    #[error("operator IN on '{0}' requires a non-empty array")]
    InvalidList(String),

    #[error("page size must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    InvalidPageSize(u32),
}

// ============================================================================
// Validated query
// ============================================================================

/// Typed operand of a validated criterion
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Single(FieldValue),
    List(Vec<FieldValue>),
}

/// A criterion bound to a schema field with a typed operand
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Position of the field in the entity schema
    pub index: usize,
    pub field: FieldDef,
    pub operator: FilterOperator,
    pub operand: Operand,
}

impl Predicate {
    fn build(criterion: &FilterCriterion, fields: &[FieldDef]) -> Result<Self, FilterError> {
        let index = field_index(fields, &criterion.field)
            .ok_or_else(|| FilterError::UnknownField(criterion.field.clone()))?;
        let field = fields[index];
        let operator = criterion.operator;

        let unsupported = || FilterError::UnsupportedOperator {
            field: field.name.to_string(),
            operator,
            kind: field.kind,
        };
        if operator.is_pattern() && field.kind != FieldKind::Text {
            return Err(unsupported());
        }
        if operator.is_ordering() && !field.kind.is_ordered() {
            return Err(unsupported());
        }

        let operand = match (operator.takes_value(), &criterion.value) {
            (false, None) => Operand::None,
            (false, Some(_)) => {
                return Err(FilterError::UnexpectedValue {
                    field: field.name.to_string(),
                    operator,
                })
            }
            (true, None) | (true, Some(Value::Null)) => {
                return Err(FilterError::MissingValue {
                    field: field.name.to_string(),
                    operator,
                })
            }
            (true, Some(value)) if operator == FilterOperator::In => match value {
                Value::Array(items) if !items.is_empty() => Operand::List(
                    items
                        .iter()
                        .map(|item| FieldValue::from_json(&field, item))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                _ => return Err(FilterError::InvalidList(field.name.to_string())),
            },
            (true, Some(value)) => Operand::Single(FieldValue::from_json(&field, value)?),
        };

        Ok(Self {
            index,
            field,
            operator,
            operand,
        })
    }

    /// Evaluates the predicate against one field value
    ///
    /// Follows SQL semantics: every comparison against a null value is false.
    pub fn test(&self, value: &FieldValue) -> bool {
        match (&self.operator, &self.operand) {
            (FilterOperator::IsNull, _) => value.is_null(),
            (FilterOperator::IsNotNull, _) => !value.is_null(),
            (FilterOperator::In, Operand::List(items)) => items
                .iter()
                .any(|item| value.compare(item) == Some(Ordering::Equal)),
            (FilterOperator::Contains, Operand::Single(FieldValue::Text(needle))) => match value {
                FieldValue::Text(hay) => hay.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            (FilterOperator::StartsWith, Operand::Single(FieldValue::Text(prefix))) => match value {
                FieldValue::Text(hay) => hay.to_lowercase().starts_with(&prefix.to_lowercase()),
                _ => false,
            },
            (operator, Operand::Single(operand)) => match value.compare(operand) {
                Some(ordering) => match operator {
                    FilterOperator::Equals => ordering == Ordering::Equal,
                    FilterOperator::NotEquals => ordering != Ordering::Equal,
                    FilterOperator::GreaterThan => ordering == Ordering::Greater,
                    FilterOperator::GreaterThanOrEqual => ordering != Ordering::Less,
                    FilterOperator::LessThan => ordering == Ordering::Less,
                    FilterOperator::LessThanOrEqual => ordering != Ordering::Greater,
                    _ => false,
                },
                None => false,
            },
            _ => false,
        }
    }
}

/// A filter request that passed validation against a field schema
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub predicates: Vec<Predicate>,
    pub page_number: u32,
    pub page_size: u32,
    /// Position of the ordering field in the schema
    pub sort_index: usize,
    pub sort_field: Option<FieldDef>,
    pub sort_direction: SortDirection,
    /// Position of the `id` field, used to make ordering total
    pub tiebreak_index: Option<usize>,
}

impl FilterQuery {
    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }

    /// Maximum number of rows in the page
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Whether a row (values aligned with the schema) satisfies every predicate
    pub fn matches(&self, values: &[FieldValue]) -> bool {
        self.predicates.iter().all(|predicate| {
            values
                .get(predicate.index)
                .map_or(false, |value| predicate.test(value))
        })
    }

    /// Orders two rows by the sort field, nulls last, then by id ascending
    pub fn compare_rows(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        let primary = match (a.get(self.sort_index), b.get(self.sort_index)) {
            (Some(x), Some(y)) => match (x.is_null(), y.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ordering = x.compare(y).unwrap_or(Ordering::Equal);
                    match self.sort_direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                }
            },
            _ => Ordering::Equal,
        };

        primary.then_with(|| match self.tiebreak_index {
            Some(i) => match (a.get(i), b.get(i)) {
                (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
            None => Ordering::Equal,
        })
    }

    /// Wraps one page of results with its metadata
    pub fn page_of<T>(&self, content: Vec<T>, total_elements: u64) -> PaginationResponse<T> {
        PaginationResponse::new(content, total_elements, self.page_number, self.page_size)
    }
}

// ============================================================================
// Response contract
// ============================================================================

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl<T> PaginationResponse<T> {
    /// Builds a page, deriving the page count from the total
    pub fn new(content: Vec<T>, total_elements: u64, current_page: u32, page_size: u32) -> Self {
        let total_pages = if total_elements == 0 || page_size == 0 {
            0
        } else {
            u32::try_from(total_elements.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };

        Self {
            content,
            total_elements,
            total_pages,
            current_page,
        }
    }

    /// Converts the page content, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResponse<U> {
        PaginationResponse {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}
