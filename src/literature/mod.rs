/// Literature layer: Crossref search, full-text retrieval and band-gap mining.
///
/// Architecture:
/// ```text
///   material name
///        │
///        ▼
///   ┌──────────┐   GET works?query=…&rows=5
///   │  search   │ ─────────────────────────▶ HttpTransport
///   └──────────┘
///        │ per work
///        ▼
///   ┌──────────┐   abstract has no value?
///   │ extract   │ ◀────────┐
///   └──────────┘          │
///                    ┌──────────┐   GET doi.org/{DOI}
///                    │  fetch    │ ──────────────────▶ HttpTransport
///                    └──────────┘
/// ```

pub mod extract;
pub mod fetch;
pub mod model;
pub mod search;
pub mod transport;

pub use extract::{BandGapExtractor, ExtractionMatch, extract_band_gap};
pub use fetch::{FullText, FullTextFetcher};
pub use model::{ExtractionSource, LiteratureWork};
pub use search::{LiteratureError, LiteratureSearcher};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
