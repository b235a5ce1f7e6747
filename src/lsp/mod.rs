//! Language Server Protocol implementation for Mini-PL.
//!
//! This module provides an LSP server that enables IDE features like:
//! - Real-time syntax and name error diagnostics
//! - Hover information (token kind and text)
//!
//! Programs are never executed by the server: a `read` would block it.
//!
//! # Architecture
//!
//! The LSP server uses `tower-lsp` and communicates via JSON-RPC over stdio.
//! It keeps the text of every open document.
//!
//! ```text
//! Editor (VSCode, etc.)
//!     ↓ JSON-RPC over stdio
//! MiniPlLanguageServer
//!     ↓ Uses
//! Mini-PL front end (lexer, parser)
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::ast::Span;
use crate::lexer::{Token, lex};
use crate::parser::Parser;

/// State for a single open document.
#[derive(Debug)]
pub struct DocumentState {
    /// The document's content.
    pub content: String,
}

/// Shared state for the language server.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Open documents indexed by URI.
    pub documents: HashMap<Url, DocumentState>,
}

/// The Mini-PL Language Server.
pub struct MiniPlLanguageServer {
    /// Client handle for sending notifications.
    client: Client,
    /// Shared server state.
    state: Arc<RwLock<ServerState>>,
}

impl MiniPlLanguageServer {
    /// Creates a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ServerState::default())),
        }
    }

    /// Analyzes a document and publishes diagnostics.
    async fn analyze_document(&self, uri: &Url, content: &str, version: i32) {
        let diagnostics = get_diagnostics(content);
        log::debug!("{uri}: {} diagnostics", diagnostics.len());
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(version))
            .await;
    }
}

/// Scans and parses `source`, converting every parse error to a diagnostic.
pub fn get_diagnostics(source: &str) -> Vec<Diagnostic> {
    let tokens = lex(source);
    let (_, errors) = Parser::new(&tokens).parse_recovering();

    errors
        .iter()
        .map(|err| Diagnostic {
            range: match err.span() {
                Some(span) => span_to_range(span),
                None => end_of_document(source),
            },
            severity: Some(DiagnosticSeverity::ERROR),
            source: Some("minipl".to_string()),
            message: err.to_string(),
            ..Default::default()
        })
        .collect()
}

/// Describes the token under `position`, if any.
pub fn get_hover_info(source: &str, position: Position) -> Option<String> {
    let tokens = lex(source);
    token_at(&tokens, position).map(|token| {
        format!(
            "**{}:** `{}`\n\n**Kind:** {}",
            token.kind.class(),
            token.text,
            token.kind
        )
    })
}

#[tower_lsp::async_trait]
impl LanguageServer for MiniPlLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Document sync - we want full content on each change
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "minipl-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Mini-PL LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        let version = params.text_document.version;

        {
            let mut state = self.state.write().await;
            state.documents.insert(
                uri.clone(),
                DocumentState {
                    content: content.clone(),
                },
            );
        }

        self.analyze_document(&uri, &content, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // FULL sync: the last change holds the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            let content = change.text;

            {
                let mut state = self.state.write().await;
                if let Some(doc) = state.documents.get_mut(&uri) {
                    doc.content = content.clone();
                }
            }

            self.analyze_document(&uri, &content, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        {
            let mut state = self.state.write().await;
            state.documents.remove(&uri);
        }

        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = {
            let state = self.state.read().await;
            state.documents.get(uri).map(|d| d.content.clone())
        };

        if let Some(content) = content
            && let Some(info) = get_hover_info(&content, position)
        {
            return Ok(Some(Hover {
                contents: HoverContents::Markup(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: info,
                }),
                range: None,
            }));
        }

        Ok(None)
    }
}

/// Converts a 1-based source span to a 0-based LSP Range on one line.
fn span_to_range(span: Span) -> Range {
    let line = to_u32(span.line.saturating_sub(1));
    let start = to_u32(span.column.saturating_sub(1));
    Range {
        start: Position {
            line,
            character: start,
        },
        end: Position {
            line,
            character: start.saturating_add(to_u32(span.len)),
        },
    }
}

/// An empty range just past the last character of `source`.
fn end_of_document(source: &str) -> Range {
    let (line, last) = source
        .split('\n')
        .enumerate()
        .last()
        .unwrap_or((0, ""));
    let position = Position {
        line: to_u32(line),
        character: to_u32(last.chars().count()),
    };
    Range {
        start: position,
        end: position,
    }
}

/// Finds the token covering an LSP position.
fn token_at(tokens: &[Token], position: Position) -> Option<&Token> {
    let line = position.line as usize + 1;
    let column = position.character as usize + 1;
    tokens.iter().find(|token| {
        let span = token.span();
        span.line == line && span.column <= column && column < span.column + span.len
    })
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_to_range() {
        let range = span_to_range(Span::new(2, 7, 5));
        assert_eq!(
            range.start,
            Position {
                line: 1,
                character: 6
            }
        );
        assert_eq!(
            range.end,
            Position {
                line: 1,
                character: 11
            }
        );
    }

    #[test]
    fn test_end_of_document() {
        let range = end_of_document("var x : int;\nprint x");
        assert_eq!(
            range.start,
            Position {
                line: 1,
                character: 7
            }
        );
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_diagnostics("var x : int 5;\nprint y;\n");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0].range.start,
            Position {
                line: 0,
                character: 12
            }
        );
        assert_eq!(diagnostics[1].range.start.line, 1);
        assert!(diagnostics[1].message.contains('y'));
    }

    #[test]
    fn test_clean_document_has_no_diagnostics() {
        assert!(get_diagnostics("var i : int := 1;\r\nprint i;\r\n").is_empty());
    }

    #[test]
    fn test_hover_info() {
        let source = "var count : int;\nprint count;";
        let info = get_hover_info(
            source,
            Position {
                line: 1,
                character: 8,
            },
        )
        .expect("hover over identifier");
        assert!(info.contains("`count`"));
        assert!(info.contains("identifier"));

        let none = get_hover_info(
            source,
            Position {
                line: 1,
                character: 5,
            },
        );
        assert!(none.is_none());
    }
}
