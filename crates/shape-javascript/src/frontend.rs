use std::path::{Path, PathBuf};
use std::sync::RwLock;

use shape_core::ast::Node;
use shape_core::error::{Error, Result};
use shape_core::frontend::{FrontendResult, LanguageFrontend};
use shape_core::span::Span;
use swc_common::input::StringInput;
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::error::Error as SwcError;
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{EsConfig, Parser, Syntax};

use crate::lower::Lowerer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JsParseMode {
    /// Any parse error, including ones the parser recovered from, fails the parse.
    Strict,
    /// Recovered errors are logged and the recovered tree is lowered.
    Loose,
}

const LANGUAGE_KEY: &str = "javascript";
const EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

pub struct JavaScriptFrontend {
    parse_mode: RwLock<JsParseMode>,
}

impl Default for JavaScriptFrontend {
    fn default() -> Self {
        Self::new(JsParseMode::Strict)
    }
}

impl JavaScriptFrontend {
    pub fn new(parse_mode: JsParseMode) -> Self {
        Self {
            parse_mode: RwLock::new(parse_mode),
        }
    }

    pub fn set_parse_mode(&self, mode: JsParseMode) {
        match self.parse_mode.write() {
            Ok(mut guard) => *guard = mode,
            Err(poison) => *poison.into_inner() = mode,
        }
    }

    pub fn parse_mode(&self) -> JsParseMode {
        match self.parse_mode.read() {
            Ok(guard) => *guard,
            Err(poison) => *poison.into_inner(),
        }
    }

    fn file_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<javascript>"))
    }
}

impl LanguageFrontend for JavaScriptFrontend {
    fn language(&self) -> &'static str {
        LANGUAGE_KEY
    }

    fn extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str, path: Option<&Path>) -> Result<FrontendResult> {
        let ast = parse_with_mode(source, path, self.parse_mode())?;
        Ok(FrontendResult {
            path: Self::file_path(path),
            ast,
        })
    }
}

/// Parse `source` as a classic script and lower it, failing on any parse error.
pub fn parse_script(source: &str) -> Result<Node> {
    parse_with_mode(source, None, JsParseMode::Strict)
}

fn file_name(path: Option<&Path>) -> FileName {
    match path {
        Some(path) => FileName::Real(path.to_path_buf()),
        None => FileName::Custom("<javascript>".into()),
    }
}

fn parse_with_mode(source: &str, path: Option<&Path>, mode: JsParseMode) -> Result<Node> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(file_name(path).into(), source.to_string());
    let base = fm.start_pos;

    let syntax = Syntax::Es(EsConfig::default());
    let lexer = Lexer::new(syntax, EsVersion::EsNext, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let script = parser.parse_script();
    let recovered = parser.take_errors();

    let script = match script {
        Ok(script) => script,
        Err(err) => return Err(syntax_error(&err, base)),
    };

    if let Some(first) = recovered.first() {
        for err in &recovered {
            tracing::debug!(
                target: LANGUAGE_KEY,
                "recovered parse error: {}",
                err.kind().msg()
            );
        }
        if matches!(mode, JsParseMode::Strict) {
            return Err(syntax_error(first, base));
        }
        tracing::warn!(
            target: LANGUAGE_KEY,
            "{} recoverable parse error(s) ignored",
            recovered.len()
        );
    }

    let lowerer = Lowerer::new(base);
    Ok(lowerer.lower_script(&script, source.len()))
}

fn syntax_error(err: &SwcError, base: BytePos) -> Error {
    let span = err.span();
    Error::syntax(
        err.kind().msg().to_string(),
        Some(Span::new(
            span.lo.0.saturating_sub(base.0),
            span.hi.0.saturating_sub(base.0),
        )),
    )
}
