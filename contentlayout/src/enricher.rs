//! Per-field-type enrichment transforms.
//!
//! Each transform takes the declared field names for one field type and walks
//! that field's normalized sequence view, mutating entries in place. Absent
//! and null fields are silently skipped, as are null elements inside a
//! sequence (their slots survive untouched). Transforms run in a straight
//! sequence with no per-field fault isolation: a malformed value aborts the
//! whole pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use contentlayout_client::ContentClient;
use contentlayout_fields::{
    get_entries, set_entries, DateEntry, DigitalAssetEntry, ReferenceEntry,
};
use contentlayout_templating::MarkdownRenderer;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LayoutError, Result};

/// Marker the rich-text editor prepends to a value that opted into markdown
/// rendering. The trailing pair is `\n\r` in that order; detection is
/// case-insensitive but only the exact lowercase marker is stripped,
/// matching what the editor emits.
const MARKDOWN_SENTINEL: &str = "<!---mde-->\n\r";

/// Applies the per-field-type transforms over a content item's field map.
///
/// Pure and synchronous; the only collaborator calls are the client's
/// synchronous helpers (rendition URLs, macro expansion). Reference-ID
/// collection must run before the batched fetch those IDs feed.
pub struct FieldEnricher<'a> {
    client: &'a dyn ContentClient,
    markdown: &'a dyn MarkdownRenderer,
    no_permission_message: &'a str,
}

impl<'a> FieldEnricher<'a> {
    pub fn new(
        client: &'a dyn ContentClient,
        markdown: &'a dyn MarkdownRenderer,
        no_permission_message: &'a str,
    ) -> Self {
        Self {
            client,
            markdown,
            no_permission_message,
        }
    }

    /// Collect the IDs of every accessible reference entry across the
    /// declared fields.
    ///
    /// Inaccessible entries get the permission message annotated in place
    /// and emit nothing; an entry is never both emitted and annotated.
    pub fn collect_reference_ids(
        &self,
        field_names: &[String],
        fields: &mut Map<String, Value>,
    ) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for name in field_names {
            let Some(mut entries) = get_entries::<Option<ReferenceEntry>>(fields, name)? else {
                continue;
            };
            for entry in entries.iter_mut() {
                let Some(entry) = entry else { continue };
                if entry.is_accessible() {
                    ids.push(entry.id.clone());
                } else {
                    entry.reference_inaccessible = Some(self.no_permission_message.to_string());
                }
            }
            set_entries(fields, name, &entries)?;
        }
        debug!(count = ids.len(), "collected reference ids");
        Ok(ids)
    }

    /// Resolve URLs and visibility for the declared digital-asset fields.
    ///
    /// Accessible video and file assets get `showName` set and no URL — the
    /// player fetches those on demand. Every other accessible kind gets a
    /// rendition URL synthesized from its ID. Inaccessible entries get the
    /// permission message.
    pub fn resolve_asset_urls(
        &self,
        field_names: &[String],
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        for name in field_names {
            let Some(mut entries) = get_entries::<Option<DigitalAssetEntry>>(fields, name)? else {
                continue;
            };
            for entry in entries.iter_mut() {
                let Some(entry) = entry else { continue };
                if !entry.is_accessible() {
                    entry.reference_inaccessible = Some(self.no_permission_message.to_string());
                } else if entry.defers_to_player() {
                    entry.show_name = Some(true);
                } else {
                    entry.url = Some(self.client.rendition_url(&entry.id));
                }
            }
            set_entries(fields, name, &entries)?;
        }
        Ok(())
    }

    /// Macro-expand the declared markdown fields, converting to HTML those
    /// values the editor marked with the markdown sentinel. Unmarked values
    /// pass through as macro-expanded plain text.
    pub fn expand_markdown(
        &self,
        field_names: &[String],
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        for name in field_names {
            let Some(mut values) = get_entries::<Option<String>>(fields, name)? else {
                continue;
            };
            for value in values.iter_mut() {
                let Some(value) = value else { continue };
                *value = self.expand_markdown_text(value);
            }
            set_entries(fields, name, &values)?;
        }
        Ok(())
    }

    /// Macro-expand the declared rich-text fields. No markdown conversion.
    pub fn expand_rich_text(
        &self,
        field_names: &[String],
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        for name in field_names {
            let Some(mut values) = get_entries::<Option<String>>(fields, name)? else {
                continue;
            };
            for value in values.iter_mut() {
                let Some(value) = value else { continue };
                *value = self.client.expand_macros(value);
            }
            set_entries(fields, name, &values)?;
        }
        Ok(())
    }

    /// Derive `formatted` for the declared date-time fields: US long form,
    /// e.g. `January 15, 2024, 10:00 AM`. Empty or missing values format to
    /// the empty string; unparseable values abort the pass.
    pub fn format_date_times(
        &self,
        field_names: &[String],
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        for name in field_names {
            let Some(mut entries) = get_entries::<Option<DateEntry>>(fields, name)? else {
                continue;
            };
            for entry in entries.iter_mut() {
                let Some(entry) = entry else { continue };
                let raw = entry.value.as_deref().unwrap_or("");
                entry.formatted = Some(if raw.is_empty() {
                    String::new()
                } else {
                    format_long_date(raw).map_err(|source| LayoutError::InvalidDate {
                        field: name.clone(),
                        source,
                    })?
                });
            }
            set_entries(fields, name, &entries)?;
        }
        Ok(())
    }

    fn expand_markdown_text(&self, text: &str) -> String {
        let expanded = self.client.expand_macros(text);
        let marked = expanded
            .get(..MARKDOWN_SENTINEL.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MARKDOWN_SENTINEL));
        if marked {
            let body = expanded
                .strip_prefix(MARKDOWN_SENTINEL)
                .unwrap_or(&expanded);
            self.markdown.to_html(body)
        } else {
            expanded
        }
    }
}

/// Format a raw timestamp as the US long form. Accepts RFC 3339, a bare
/// naive datetime (with or without fractional seconds), or a bare date.
fn format_long_date(raw: &str) -> std::result::Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(raw).or_else(|err| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|n| n.and_utc().fixed_offset())
            .or_else(|_| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            })
            .map_err(|_| err)
    })?;
    Ok(parsed.format("%B %-d, %Y, %-I:%M %p").to_string())
}
