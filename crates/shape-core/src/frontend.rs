use crate::ast::Node;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Result produced by a language frontend after lowering source code.
#[derive(Debug, Clone)]
pub struct FrontendResult {
    pub path: PathBuf,
    pub ast: Node,
}

/// Trait implemented by every source-language frontend.
pub trait LanguageFrontend: Send + Sync {
    fn language(&self) -> &'static str;
    fn extensions(&self) -> &'static [&'static str];
    fn parse(&self, source: &str, path: Option<&Path>) -> Result<FrontendResult>;

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
