use crate::duration::normalize_duration;
use crate::page::ItemElement;
use crate::record::{ItemRecord, NO_DESCRIPTION, UNKNOWN_DURATION};
use crate::site::{FeedSite, FieldStrategy, Read};
use crate::Error;
use std::fmt;

/// Result of running a single [`FieldStrategy`]
#[derive(Debug)]
pub enum StrategyOutcome {
    /// Trimmed value, possibly empty when the element carries blank text
    Found(String),
    /// Element matched but does not carry the value at all
    Absent,
    Failed(Error),
}

impl StrategyOutcome {
    fn is_blank(&self) -> bool {
        matches!(self, StrategyOutcome::Found(v) if v.is_empty())
    }
}

impl FieldStrategy {
    /// Run this strategy against one item
    pub async fn apply<E: ItemElement + ?Sized>(&self, item: &E) -> StrategyOutcome {
        let value = match &self.read {
            Read::Text => item.text(&self.selector).await,
            Read::ScriptText => item.script_text(&self.selector).await,
            Read::Attribute(name) => item.attribute(&self.selector, name).await,
        };

        match value {
            Ok(Some(v)) => StrategyOutcome::Found(v.trim().to_string()),
            Ok(None) => StrategyOutcome::Absent,
            Err(e) => StrategyOutcome::Failed(e),
        }
    }
}

/// What a fallback chain accepts as a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    /// Any value the element carries, blank text included
    Present,
    /// Only non-empty values
    NonEmpty,
}

/// Why an item produced no record
#[derive(Debug)]
pub enum RecordRejected {
    MissingTitle,
    MissingUrl,
    /// Locating the title anchor itself failed
    Anchor(Error),
}

impl fmt::Display for RecordRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRejected::MissingTitle => write!(f, "title is missing"),
            RecordRejected::MissingUrl => write!(f, "url is missing"),
            RecordRejected::Anchor(e) => write!(f, "title anchor lookup failed: {}", e),
        }
    }
}

/// Turns item elements into [`ItemRecord`]s, one field at a time
pub struct FieldExtractor<'a> {
    site: &'a FeedSite,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(site: &'a FeedSite) -> Self {
        Self { site }
    }

    /// Extract a record from one item.
    ///
    /// Only a missing title or url rejects the item. Duration and description
    /// fall back to their placeholders when no path yields a value; blank text
    /// on a present element is kept as is.
    pub async fn extract<E: ItemElement + ?Sized>(
        &self,
        item: &E,
    ) -> Result<ItemRecord, RecordRejected> {
        let (title, url) = self.title_and_url(item).await?;

        let duration_raw = first_match(
            item,
            &self.site.duration,
            Accept::Present,
            "duration",
            &title,
        )
        .await;
        if duration_raw.is_none() {
            tracing::error!("Duration not found for video {}", title);
        }
        let duration_display = duration_raw
            .as_deref()
            .map(normalize_duration)
            .unwrap_or_else(|| UNKNOWN_DURATION.to_string());

        let description = first_match(
            item,
            &self.site.description,
            Accept::Present,
            "description",
            &title,
        )
        .await
        .unwrap_or_else(|| {
            tracing::error!("Description not found for video {}", title);
            NO_DESCRIPTION.to_string()
        });

        let thumbnail_url = first_match(
            item,
            &self.site.thumbnail,
            Accept::NonEmpty,
            "thumbnail",
            &title,
        )
        .await;

        Ok(ItemRecord {
            title,
            url,
            duration_raw,
            duration_display,
            description,
            thumbnail_url,
        })
    }

    async fn title_and_url<E: ItemElement + ?Sized>(
        &self,
        item: &E,
    ) -> Result<(String, String), RecordRejected> {
        let anchor = &self.site.title_anchor;

        let title = item
            .attribute(&anchor.selector, &anchor.title_attribute)
            .await
            .map_err(RecordRejected::Anchor)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(RecordRejected::MissingTitle)?;

        let href = item
            .attribute(&anchor.selector, &anchor.url_attribute)
            .await
            .map_err(RecordRejected::Anchor)?
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .ok_or(RecordRejected::MissingUrl)?;

        let url = self.site.resolve_link(&href).unwrap_or(href);

        Ok((title, url))
    }
}

/// Walk a fallback chain, returning the first value `accept` allows
async fn first_match<E: ItemElement + ?Sized>(
    item: &E,
    strategies: &[FieldStrategy],
    accept: Accept,
    field: &str,
    title: &str,
) -> Option<String> {
    for (position, strategy) in strategies.iter().enumerate() {
        let outcome = strategy.apply(item).await;
        if accept == Accept::NonEmpty && outcome.is_blank() {
            tracing::debug!(
                "{} empty at path {} ({}) for video {}",
                field,
                position,
                strategy.selector,
                title
            );
            continue;
        }

        match outcome {
            StrategyOutcome::Found(value) => return Some(value),
            StrategyOutcome::Absent => tracing::debug!(
                "{} empty at path {} ({}) for video {}",
                field,
                position,
                strategy.selector,
                title
            ),
            StrategyOutcome::Failed(e) => tracing::debug!(
                "{} not found at path {} ({}) for video {}: {}",
                field,
                position,
                strategy.selector,
                title,
                e
            ),
        }
    }
    None
}
