use scraper::Html;

use super::transport::HttpTransport;

/// Result of a full-text retrieval. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullText {
    Retrieved(String),
    Unavailable { reason: String },
}

impl FullText {
    pub fn text(&self) -> Option<&str> {
        match self {
            FullText::Retrieved(text) => Some(text),
            FullText::Unavailable { .. } => None,
        }
    }
}

/// Downloads a document page and reduces it to its visible text.
pub struct FullTextFetcher<'a, T: HttpTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: HttpTransport + ?Sized> FullTextFetcher<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// One GET; anything but status 200 leaves the text unavailable.
    pub fn fetch(&self, url: &str) -> FullText {
        match self.transport.get(url) {
            Ok(response) if response.status == 200 => FullText::Retrieved(strip_markup(&response.body)),
            Ok(response) => {
                let reason = format!("failed to retrieve full text from {url}: HTTP {}", response.status);
                log::warn!("{reason}");
                FullText::Unavailable { reason }
            }
            Err(e) => {
                let reason = format!("failed to retrieve full text: {e}");
                log::warn!("{reason}");
                FullText::Unavailable { reason }
            }
        }
    }
}

/// Text content of an HTML document, whitespace-collapsed.
/// Script and style bodies are not visible and are dropped.
pub fn strip_markup(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript" | "template"))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literature::transport::{HttpResponse, TransportError};

    struct Fixed(Result<HttpResponse, TransportError>);

    impl HttpTransport for Fixed {
        fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            self.0.clone()
        }
    }

    #[test]
    fn markup_is_stripped() {
        let html = "<html><head><title>TiO2</title><style>p { color: red }</style></head>\
                    <body><p>The <b>band gap</b> is\n 3.2 eV.</p><script>var x = 1;</script></body></html>";
        assert_eq!(strip_markup(html), "TiO2 The band gap is 3.2 eV.");
    }

    #[test]
    fn ok_status_returns_text() {
        let transport = Fixed(Ok(HttpResponse {
            status: 200,
            body: "<p>hello <i>world</i></p>".into(),
        }));
        let text = FullTextFetcher::new(&transport).fetch("https://doi.org/10.1/x");
        assert_eq!(text.text(), Some("hello world"));
    }

    #[test]
    fn other_status_is_unavailable() {
        let transport = Fixed(Ok(HttpResponse {
            status: 403,
            body: "forbidden".into(),
        }));
        let text = FullTextFetcher::new(&transport).fetch("https://doi.org/10.1/x");
        assert_eq!(text.text(), None);
        assert!(matches!(text, FullText::Unavailable { reason } if reason.contains("403")));
    }

    #[test]
    fn transport_failure_is_unavailable() {
        let transport = Fixed(Err(TransportError::Request {
            url: "https://doi.org/10.1/x".into(),
            message: "connection refused".into(),
        }));
        let text = FullTextFetcher::new(&transport).fetch("https://doi.org/10.1/x");
        assert!(matches!(text, FullText::Unavailable { reason } if reason.contains("connection refused")));
    }
}
