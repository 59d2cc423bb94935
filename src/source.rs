use once_cell::sync::Lazy;
use regex::Regex;
use swc_core::{
    common::{
        sync::Lrc, BytePos, FileName, Globals, Mark, SourceFile, SourceMap, Span, Spanned, GLOBALS,
    },
    ecma::{
        ast::{BlockStmt, EsVersion, Module},
        parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax},
        transforms::base::resolver,
        visit::VisitMutWith,
    },
};

use crate::edit::TextRange;
use crate::error::MigrateError;

// Whitespace plus line and block comments.
static TRIVIA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s+|//[^\n]*|/\*(?s:.*?)\*/)*").expect("trivia pattern"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_$]+").expect("word pattern"));

// -----------------------------------------------------------------------------
// Source text queries
// -----------------------------------------------------------------------------

/// A lexical token as seen by the fixers: an identifier-like word or a single
/// punctuator character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub range: TextRange,
    pub value: &'a str,
}

impl Token<'_> {
    pub fn is_punct(&self, p: &str) -> bool {
        self.value == p
    }
}

/// Read-only view over one file's text. All queries are pure; nothing here
/// keeps a cursor.
pub struct SourceCode {
    filename: String,
    text: String,
    cm: Lrc<SourceMap>,
    file: Lrc<SourceFile>,
}

impl SourceCode {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.file.start_pos.0) as usize
    }

    pub fn range(&self, span: Span) -> TextRange {
        TextRange::new(self.offset(span.lo), self.offset(span.hi))
    }

    pub fn text(&self, span: Span) -> &str {
        self.slice(self.range(span))
    }

    pub fn slice(&self, range: TextRange) -> &str {
        self.text.get(range.start..range.end).unwrap_or("")
    }

    /// 1-based line and 0-based column of the span start.
    pub fn line_col(&self, span: Span) -> (usize, usize) {
        if span.is_dummy() {
            return (0, 0);
        }
        let loc = self.cm.lookup_char_pos(span.lo);
        (loc.line, loc.col.0)
    }

    /// The token immediately following `span`, skipping whitespace and comments.
    pub fn token_after(&self, span: Span) -> Option<Token<'_>> {
        let end = self.offset(span.hi);
        let rest = self.text.get(end..)?;
        let skipped = TRIVIA.find(rest).map(|m| m.end()).unwrap_or(0);
        self.token_at(end + skipped)
    }

    /// The opening brace of a block.
    pub fn first_token(&self, block: &BlockStmt) -> Option<Token<'_>> {
        self.token_at(self.offset(block.span.lo))
            .filter(|t| t.is_punct("{"))
    }

    fn token_at(&self, pos: usize) -> Option<Token<'_>> {
        let rest = self.text.get(pos..)?;
        let len = match WORD.find(rest) {
            Some(m) => m.end(),
            None => rest.chars().next()?.len_utf8(),
        };
        Some(Token {
            range: TextRange::new(pos, pos + len),
            value: &rest[..len],
        })
    }
}

// -----------------------------------------------------------------------------
// Parsing (host adapter)
// -----------------------------------------------------------------------------

/// A parsed module with scope-resolved identifiers.
pub struct ParsedFile {
    pub source: SourceCode,
    pub module: Module,
}

impl ParsedFile {
    pub fn parse(filename: &str, text: &str) -> Result<Self, MigrateError> {
        let cm: Lrc<SourceMap> = Default::default();
        let file = cm.new_source_file(
            FileName::Custom(filename.to_string()).into(),
            text.to_string(),
        );
        let typescript = is_typescript(filename);
        let syntax = if typescript {
            Syntax::Typescript(TsSyntax {
                tsx: filename.ends_with(".tsx"),
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            })
        };

        let source = SourceCode {
            filename: filename.to_string(),
            text: text.to_string(),
            cm,
            file,
        };

        let module = GLOBALS.set(&Globals::new(), || {
            let mut recovered = vec![];
            let parsed = parse_file_as_module(
                &source.file,
                syntax,
                EsVersion::latest(),
                None,
                &mut recovered,
            );
            let mut module = match (parsed, recovered.into_iter().next()) {
                (Ok(module), None) => module,
                (Err(err), _) | (Ok(_), Some(err)) => {
                    return Err(MigrateError::Parse {
                        filename: filename.to_string(),
                        offset: source.offset(err.span().lo),
                        message: err.kind().msg().to_string(),
                    });
                }
            };
            let unresolved_mark = Mark::new();
            let top_level_mark = Mark::new();
            module.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, typescript));
            Ok(module)
        })?;

        Ok(Self { source, module })
    }
}

fn is_typescript(filename: &str) -> bool {
    [".ts", ".tsx", ".mts", ".cts"]
        .iter()
        .any(|ext| filename.ends_with(ext))
}
