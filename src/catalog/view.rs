use crate::models::{AttributeKind, Record, RecordId};
use std::sync::Arc;

/// A filtered view over one catalog snapshot.
///
/// Iteration is lazy and can be restarted any number of times; the view keeps its own
/// snapshot, so results stay stable while the catalog moves on.
#[derive(Debug, Clone)]
pub struct CatalogView {
    snapshot: Arc<Vec<Record>>,
    kind: AttributeKind,
    needle: String,
    only_missing: bool,
}

impl CatalogView {
    pub(crate) fn new(
        snapshot: Arc<Vec<Record>>,
        kind: AttributeKind,
        query: &str,
        only_missing: bool,
    ) -> Self {
        let needle = if query.trim().is_empty() {
            String::new()
        } else {
            query.to_lowercase()
        };
        Self {
            snapshot,
            kind,
            needle,
            only_missing,
        }
    }

    pub fn iter(&self) -> ViewIter<'_> {
        ViewIter {
            inner: self.snapshot.iter(),
            view: self,
        }
    }

    /// Identifiers in view order, as fed to `SelectionSet::select_all`
    pub fn ids(&self) -> Vec<RecordId> {
        self.iter().map(|record| record.id).collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Export the visible rows as `ID,Name,SKU,Barcode` CSV
    pub fn to_csv(&self) -> String {
        let mut out = String::from("\"ID\",\"Name\",\"SKU\",\"Barcode\"");
        for record in self.iter() {
            let id = record.id.to_string();
            let fields = [
                id.as_str(),
                record.name.as_deref().unwrap_or(""),
                record.sku.as_deref().unwrap_or(""),
                record.barcode.as_deref().unwrap_or(""),
            ];
            out.push('\n');
            out.push_str(
                &fields
                    .iter()
                    .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        out
    }

    fn admits(&self, record: &Record) -> bool {
        if self.only_missing && record.is_satisfied(self.kind) {
            return false;
        }
        record.matches_lowered(&self.needle)
    }
}

impl<'a> IntoIterator for &'a CatalogView {
    type Item = &'a Record;
    type IntoIter = ViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records admitted by a [`CatalogView`]
pub struct ViewIter<'a> {
    inner: std::slice::Iter<'a, Record>,
    view: &'a CatalogView,
}

impl<'a> Iterator for ViewIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.view;
        self.inner.by_ref().find(|record| view.admits(record))
    }
}
