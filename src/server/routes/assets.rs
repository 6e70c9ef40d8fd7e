//! Static file serving for the frontend bundle.

use std::path::Path;
use tower_http::services::ServeDir;

/// Service resolving paths against the bundle directory.
///
/// `/` serves the entry document (`index.html`); any other path maps to the
/// file under the root, content type inferred from the extension. `ServeDir`
/// refuses `..` traversal, so nothing outside the root is ever served;
/// unresolved paths get a 404.
pub fn bundle_service(static_dir: &Path) -> ServeDir {
    tracing::info!(path = %static_dir.display(), "serving frontend bundle");
    ServeDir::new(static_dir)
}
