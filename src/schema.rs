//! Column declarations and the per-type schema cache
//!
//! A [`Column`] is the declarative descriptor for one exportable field:
//! display name, semantic data type, optional format, sort order, exportable
//! flag, and the accessor that reads the field's value. A [`Schema`] is the
//! resolved, ordered column list for one record type.
//!
//! Resolving a schema filters out non-exportable columns and sorts the rest,
//! so it happens once per type: the result is stored in a process-wide cache
//! keyed by `TypeId` and reused by every subsequent export of that type. The
//! cache is never invalidated automatically; [`clear_schema_cache`] exists
//! for tests and hot configuration reload.

use crate::error::{ExportError, Result};
use crate::options::FormatDefaults;
use crate::row::ExportRow;
use crate::types::{CellData, ExcelDataType};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Declarative descriptor for one exportable field of `T`
pub struct Column<T> {
    /// Header text for the column
    pub display_name: String,
    /// Semantic type driving formatting and native cell placement
    pub data_type: ExcelDataType,
    /// Type-specific format pattern; `None` falls back to the per-type
    /// default carried by the active [`FormatDefaults`]
    pub format: Option<String>,
    /// Ascending sort key; ties break by display name
    pub order: i32,
    /// Columns declared with `exportable == false` are dropped at schema
    /// resolution
    pub exportable: bool,
    accessor: fn(&T) -> CellData,
}

impl<T> Column<T> {
    /// Declare a column with the given header, data type and field accessor
    pub fn new(
        display_name: impl Into<String>,
        data_type: ExcelDataType,
        accessor: fn(&T) -> CellData,
    ) -> Self {
        Column {
            display_name: display_name.into(),
            data_type,
            format: None,
            order: 0,
            exportable: true,
            accessor,
        }
    }

    /// Declare the reserved "Exported At" column, ordered after everything
    /// else. The accessor typically reads the slot stamped by
    /// [`ExportRow::prepare_for_export`].
    pub fn exported_at(accessor: fn(&T) -> CellData) -> Self {
        Column::new("Exported At", ExcelDataType::Date, accessor)
            .format("yyyy-mm-dd hh:mm:ss")
            .order(i32::MAX)
    }

    /// Set the sort order (ascending)
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set an explicit format pattern
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Mark the column as non-exportable; it is dropped from the schema
    pub fn not_exportable(mut self) -> Self {
        self.exportable = false;
        self
    }

    /// Read this column's value from a record
    pub fn value_of(&self, record: &T) -> CellData {
        (self.accessor)(record)
    }

    /// Effective format pattern: the declared one, or the per-type default
    /// from the active format defaults
    pub fn effective_format<'a>(&'a self, defaults: &'a FormatDefaults) -> &'a str {
        match &self.format {
            Some(f) => f,
            None => defaults.for_type(self.data_type),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            display_name: self.display_name.clone(),
            data_type: self.data_type,
            format: self.format.clone(),
            order: self.order,
            exportable: self.exportable,
            accessor: self.accessor,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("display_name", &self.display_name)
            .field("data_type", &self.data_type)
            .field("format", &self.format)
            .field("order", &self.order)
            .field("exportable", &self.exportable)
            .finish()
    }
}

/// Resolved, ordered column list for one record type
#[derive(Debug)]
pub struct Schema<T> {
    columns: Vec<Column<T>>,
}

impl<T: ExportRow> Schema<T> {
    fn build() -> Result<Self> {
        let mut columns: Vec<Column<T>> = T::columns()
            .into_iter()
            .filter(|c| c.exportable)
            .collect();

        if columns.is_empty() {
            return Err(ExportError::InvalidExportType {
                type_name: std::any::type_name::<T>(),
            });
        }

        columns.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        Ok(Schema { columns })
    }

    /// The exportable columns, in header order
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Number of exportable columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns (never true for a resolved schema)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header texts, in column order
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.display_name.as_str()).collect()
    }
}

static SCHEMA_CACHE: LazyLock<DashMap<TypeId, Arc<dyn Any + Send + Sync>>> =
    LazyLock::new(DashMap::new);

/// Resolve the schema for `T`, building and caching it on first use.
///
/// Later calls return the cached `Arc` without re-running the declaration.
/// Concurrent first calls for the same type may build twice; the first
/// insert wins and both callers observe a consistent schema.
///
/// # Errors
///
/// [`ExportError::InvalidExportType`] when `T` declares no exportable
/// columns.
pub fn schema_of<T: ExportRow>() -> Result<Arc<Schema<T>>> {
    let key = TypeId::of::<T>();

    if let Some(entry) = SCHEMA_CACHE.get(&key) {
        let cached = Arc::clone(entry.value());
        return Ok(cached
            .downcast::<Schema<T>>()
            .expect("schema cache entry does not match its TypeId key"));
    }

    // Build outside the map so a slow declaration never holds a shard lock.
    let built: Arc<Schema<T>> = Arc::new(Schema::build()?);
    debug!(
        type_name = std::any::type_name::<T>(),
        columns = built.len(),
        "schema built"
    );

    let entry = SCHEMA_CACHE.entry(key).or_insert_with(|| {
        let erased: Arc<dyn Any + Send + Sync> = built;
        erased
    });
    let cached = Arc::clone(entry.value());
    drop(entry);

    Ok(cached
        .downcast::<Schema<T>>()
        .expect("schema cache entry does not match its TypeId key"))
}

/// Drop every cached schema. Intended for tests and hot configuration
/// reload; normal operation never needs it.
pub fn clear_schema_cache() {
    SCHEMA_CACHE.clear();
}
