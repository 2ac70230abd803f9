//! SQL rendering of validated filter queries
//!
//! Column names come from the entity field schema, never from the request,
//! and every operand is sent as a bind parameter.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use core_kernel::filter::{Operand, Predicate};
use core_kernel::{FieldDef, FieldKind, FieldValue, FilterOperator, FilterQuery};

/// Comma separated column list in schema order
pub fn column_list(fields: &[FieldDef]) -> String {
    fields.iter().map(|f| f.name).collect::<Vec<_>>().join(", ")
}

/// Binds one field value, sending nulls with the column's type
pub fn push_value(builder: &mut QueryBuilder<'static, Postgres>, kind: FieldKind, value: &FieldValue) {
    match value {
        FieldValue::Uuid(v) => builder.push_bind(*v),
        FieldValue::Text(v) => builder.push_bind(v.clone()),
        FieldValue::Bool(v) => builder.push_bind(*v),
        FieldValue::Date(v) => builder.push_bind(*v),
        FieldValue::Timestamp(v) => builder.push_bind(*v),
        FieldValue::Decimal(v) => builder.push_bind(*v),
        FieldValue::Integer(v) => match i32::try_from(*v) {
            Ok(small) => builder.push_bind(small),
            Err(_) => builder.push_bind(*v),
        },
        FieldValue::Null => match kind {
            FieldKind::Uuid => builder.push_bind(None::<Uuid>),
            FieldKind::Text => builder.push_bind(None::<String>),
            FieldKind::Bool => builder.push_bind(None::<bool>),
            FieldKind::Date => builder.push_bind(None::<NaiveDate>),
            FieldKind::Timestamp => builder.push_bind(None::<DateTime<Utc>>),
            FieldKind::Decimal => builder.push_bind(None::<Decimal>),
            FieldKind::Integer => builder.push_bind(None::<i32>),
        },
    };
}

/// Escapes `LIKE` wildcards so the operand matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn comparison(operator: FilterOperator) -> &'static str {
    match operator {
        FilterOperator::NotEquals => " <> ",
        FilterOperator::GreaterThan => " > ",
        FilterOperator::GreaterThanOrEqual => " >= ",
        FilterOperator::LessThan => " < ",
        FilterOperator::LessThanOrEqual => " <= ",
        _ => " = ",
    }
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    let column = predicate.field.name;
    let kind = predicate.field.kind;

    match (predicate.operator, &predicate.operand) {
        (FilterOperator::IsNull, _) => {
            builder.push(column).push(" IS NULL");
        }
        (FilterOperator::IsNotNull, _) => {
            builder.push(column).push(" IS NOT NULL");
        }
        (FilterOperator::Contains, Operand::Single(FieldValue::Text(needle))) => {
            builder
                .push(column)
                .push(" ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)))
                .push(" ESCAPE '\\'");
        }
        (FilterOperator::StartsWith, Operand::Single(FieldValue::Text(prefix))) => {
            builder
                .push(column)
                .push(" ILIKE ")
                .push_bind(format!("{}%", escape_like(prefix)))
                .push(" ESCAPE '\\'");
        }
        (FilterOperator::In, Operand::List(items)) => {
            builder.push(column).push(" IN (");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    builder.push(", ");
                }
                push_value(builder, kind, item);
            }
            builder.push(")");
        }
        (operator, Operand::Single(value)) => {
            builder.push(column).push(comparison(operator));
            push_value(builder, kind, value);
        }
        // Validation never produces other shapes; match nothing
        _ => {
            builder.push("FALSE");
        }
    }
}

/// Appends `WHERE` with every predicate joined by `AND`
pub fn push_where(builder: &mut QueryBuilder<'static, Postgres>, query: &FilterQuery) {
    for (i, predicate) in query.predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(builder, predicate);
    }
}

/// Builds the page query: matching rows, ordered, limited and offset
///
/// Rows are ordered by the sort field with nulls last, then by `id` so that
/// pages never overlap.
pub fn select_page(table: &str, fields: &[FieldDef], query: &FilterQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", column_list(fields), table));
    push_where(&mut builder, query);

    let sort = query.sort_field.map_or("created_at", |f| f.name);
    builder
        .push(" ORDER BY ")
        .push(sort)
        .push(" ")
        .push(query.sort_direction.as_sql())
        .push(" NULLS LAST");
    if sort != "id" {
        builder.push(", id ASC");
    }

    builder
        .push(" LIMIT ")
        .push_bind(i64::try_from(query.limit()).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));
    builder
}

/// Builds the query counting every matching row
pub fn count_matching(table: &str, query: &FilterQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
    push_where(&mut builder, query);
    builder
}

/// Builds an upsert of every column, keyed on `id`
///
/// `created_at` is never overwritten on conflict.
pub fn upsert(table: &str, fields: &[FieldDef], values: &[FieldValue]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} ({}) VALUES (", table, column_list(fields)));
    for (i, (field, value)) in fields.iter().zip(values).enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, field.kind, value);
    }

    let updates = fields
        .iter()
        .filter(|f| f.name != "id" && f.name != "created_at")
        .map(|f| format!("{0} = EXCLUDED.{0}", f.name))
        .collect::<Vec<_>>()
        .join(", ");
    builder
        .push(") ON CONFLICT (id) DO UPDATE SET ")
        .push(updates)
        .push(format!(" RETURNING {}", column_list(fields)));
    builder
}
