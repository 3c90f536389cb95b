use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const INDEX_TEMPLATE: &str = "index.html.j2";

/// Built-in template for the index artifact.
pub fn index_template() -> Result<&'static str, AppError> {
    ASSETS_DIR.get_file(INDEX_TEMPLATE).and_then(|file| file.contents_utf8()).ok_or_else(|| {
        AppError::config_error(format!("Missing embedded asset: {}", INDEX_TEMPLATE))
    })
}
