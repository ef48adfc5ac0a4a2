use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use dom::{Dom, DomException, NodeId};
use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use thiserror::Error;

use crate::fetch::{FetchError, ResourceFetcher};

#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("failed to fetch template {url:?}")]
    Fetch {
        url: String,
        #[source]
        source: Arc<FetchError>,
    },
    #[error("failed to parse template {url:?}")]
    Parse {
        url: String,
        #[source]
        source: DomException,
    },
}

/// Parsed template markup, held in its own inert arena.
#[derive(Debug)]
pub struct HtmlTemplate {
    dom: Dom,
    content: NodeId,
}

impl HtmlTemplate {
    pub fn parse(html: &str) -> Result<Self, DomException> {
        let mut dom = Dom::new();
        let document = dom.create_inert_document();
        let content = parser::parse_fragment(&mut dom, document, html)?;
        Ok(Self { dom, content })
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn inner_html(&self) -> String {
        self.dom.inner_html(self.content)
    }

    /// Deep-copies the template contents into a new fragment of `document`.
    pub fn instantiate(&self, dom: &mut Dom, document: NodeId) -> Result<NodeId, DomException> {
        let fragment = dom.create_document_fragment(document);
        for &child in self.dom.children(self.content) {
            let copy = dom.import_node(document, &self.dom, child, true)?;
            dom.append_child(fragment, copy)?;
        }
        Ok(fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateState {
    Pending,
    Ready,
    Failed,
}

type TemplateFuture = Shared<LocalBoxFuture<'static, Result<Rc<HtmlTemplate>, TemplateError>>>;

/// The shared, lazily resolved template of a registered element type.
///
/// Every clone observes the same outcome. A failed template stays failed.
#[derive(Clone)]
pub struct Template {
    url: String,
    future: TemplateFuture,
}

impl Template {
    pub fn fetch(url: impl Into<String>, fetcher: &dyn ResourceFetcher) -> Self {
        let url = url.into();
        let source = fetcher.fetch(&url);
        let future = {
            let url = url.clone();
            async move {
                let html = source.await.map_err(|error| TemplateError::Fetch {
                    url: url.clone(),
                    source: Arc::new(error),
                })?;
                let template = HtmlTemplate::parse(&html)
                    .map_err(|source| TemplateError::Parse { url, source })?;
                Ok::<_, TemplateError>(Rc::new(template))
            }
        };

        Self {
            url,
            future: future.boxed_local().shared(),
        }
    }

    /// A template that is already resolved.
    pub fn ready(url: impl Into<String>, template: HtmlTemplate) -> Self {
        let future = futures::future::ready(Ok(Rc::new(template)));
        Self {
            url: url.into(),
            future: future.boxed_local().shared(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> TemplateState {
        match self.future.peek() {
            None => TemplateState::Pending,
            Some(Ok(_)) => TemplateState::Ready,
            Some(Err(_)) => TemplateState::Failed,
        }
    }

    /// The outcome, if the template has settled.
    pub fn get(&self) -> Option<Result<Rc<HtmlTemplate>, TemplateError>> {
        self.future.peek().cloned()
    }
}

impl Future for Template {
    type Output = Result<Rc<HtmlTemplate>, TemplateError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.poll_unpin(cx)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::fetch::ResourceMap;

    #[test]
    fn template_resolves_once_for_every_clone() {
        let resources = ResourceMap::new().with("panel.html", "<div class=\"handle\"></div><slot></slot>");
        let template = Template::fetch("panel.html", &resources);
        let other = template.clone();
        assert_eq!(template.state(), TemplateState::Pending);

        let parsed = block_on(template.clone()).unwrap();
        assert_eq!(parsed.inner_html(), "<div class=\"handle\"></div><slot></slot>");
        assert_eq!(other.state(), TemplateState::Ready);
        assert!(Rc::ptr_eq(&parsed, &other.get().unwrap().unwrap()));
    }

    #[test]
    fn unreachable_template_stays_failed() {
        let template = Template::fetch("missing.html", &ResourceMap::new());
        assert!(matches!(
            block_on(template.clone()),
            Err(TemplateError::Fetch { .. })
        ));
        assert_eq!(template.state(), TemplateState::Failed);
        assert!(matches!(template.get(), Some(Err(_))));
    }

    #[test]
    fn instantiate_copies_into_another_arena() {
        let template = HtmlTemplate::parse("<p>a<b>b</b></p><!--c-->").unwrap();

        let mut dom = Dom::new();
        let document = dom.create_document();
        let fragment = template.instantiate(&mut dom, document).unwrap();
        assert_eq!(dom.inner_html(fragment), "<p>a<b>b</b></p><!--c-->");
        assert_eq!(dom.node_document(fragment), document);

        // The template itself is left untouched.
        assert_eq!(template.inner_html(), "<p>a<b>b</b></p><!--c-->");
    }
}
