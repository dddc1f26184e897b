use crate::Error;
use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use feedscrape_core::page::{FeedPage, ItemElement};
use feedscrape_core::{Result, WaitCondition};

fn cdp(err: CdpError) -> feedscrape_core::Error {
    Error::from(err).into()
}

/// Quote `selector` as a JavaScript string literal
fn js_string(selector: &str) -> Result<String> {
    Ok(serde_json::to_string(selector)?)
}

/// Script answering whether the first match of `selector` is ready
fn readiness_script(selector: &str, condition: WaitCondition) -> Result<String> {
    let selector = js_string(selector)?;
    Ok(match condition {
        WaitCondition::Presence => format!("document.querySelector({}) !== null", selector),
        WaitCondition::Visibility => format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return false;
                const box = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return box.width > 0 && box.height > 0 && style.visibility !== 'hidden';
            }})()"#,
            selector
        ),
    })
}

/// Live Chrome tab showing the feed
#[derive(Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl FeedPage for ChromePage {
    type Item = ChromeItem;

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await.map_err(cdp)?;
        Ok(())
    }

    async fn has_item(&self, selector: &str, condition: WaitCondition) -> Result<bool> {
        let script = readiness_script(selector, condition)?;
        let ready: bool = self
            .page
            .evaluate(script)
            .await
            .map_err(cdp)?
            .into_value()?;
        Ok(ready)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.documentElement.scrollHeight)")
            .await
            .map_err(cdp)?;
        Ok(())
    }

    async fn document_height(&self) -> Result<u64> {
        let height: f64 = self
            .page
            .evaluate("document.documentElement.scrollHeight")
            .await
            .map_err(cdp)?
            .into_value()?;
        Ok(height.max(0.0).round() as u64)
    }

    async fn items(&self, selector: &str) -> Result<Vec<ChromeItem>> {
        let elements = self.page.find_elements(selector).await.map_err(cdp)?;
        Ok(elements.into_iter().map(ChromeItem::new).collect())
    }
}

/// One feed item element inside a [`ChromePage`]
pub struct ChromeItem {
    element: Element,
}

impl ChromeItem {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    async fn descendant(&self, selector: &str) -> Result<Element> {
        self.element
            .find_element(selector)
            .await
            .map_err(|e| feedscrape_core::Error::ElementNotFound(format!("{}: {}", selector, e)))
    }
}

#[async_trait]
impl ItemElement for ChromeItem {
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let element = self.descendant(selector).await?;
        element.attribute(name).await.map_err(cdp)
    }

    async fn text(&self, selector: &str) -> Result<Option<String>> {
        let element = self.descendant(selector).await?;
        element.inner_text().await.map_err(cdp)
    }

    async fn script_text(&self, selector: &str) -> Result<Option<String>> {
        let function = format!(
            r#"function() {{
                const el = this.querySelector({});
                return el ? el.innerText.trim() : null;
            }}"#,
            js_string(selector)?
        );

        let returns = self
            .element
            .call_js_fn(function, false)
            .await
            .map_err(cdp)?;

        if let Some(details) = returns.exception_details {
            return Err(feedscrape_core::Error::Browser(format!(
                "script failed for {}: {}",
                selector, details.text
            )));
        }

        match returns.result.value {
            Some(serde_json::Value::String(text)) => Ok(Some(text)),
            Some(serde_json::Value::Null) | None => {
                Err(feedscrape_core::Error::ElementNotFound(selector.to_string()))
            }
            Some(other) => Ok(Some(other.to_string())),
        }
    }
}
