//! LSP dispatcher: per-document state, request/notification routing, and
//! the stdio main loop.
//!
//! The dispatch table (which method maps to which handler) is grounded on
//! `original_source/cms2_lsp_server.py`'s `_handle_message`: five requests
//! (completion/hover/definition/references/document-symbol) plus three
//! document-lifecycle notifications, served from a single in-memory
//! per-URI document store. Diagnostics are a declared-but-unimplemented
//! capability, never produced.

pub mod logger;
mod markdown;

use ahash::{AHashMap, AHashSet};
use cms2_core::model::SemanticModel;
use cms2_core::query;
use lsp_server::{Connection, Message, RequestId, Response};
use lsp_types::notification::{
    DidChangeTextDocument, DidCloseTextDocument, DidOpenTextDocument, Notification,
};
use lsp_types::request::{
    Completion, DocumentSymbolRequest, GotoDefinition, HoverRequest, References,
    Request as LspRequest,
};
use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DocumentSymbol, DocumentSymbolParams, DocumentSymbolResponse, Documentation,
    GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverContents, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, Location, MarkupContent,
    MarkupKind, OneOf, Position, Range, ReferenceParams, SaveOptions, ServerCapabilities,
    ServerInfo, SymbolKind, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions, TextDocumentSyncSaveOptions, Uri,
};

/// Raw text plus the semantic model produced by the most recent parse.
/// Every `didOpen`/`didChange` reparses from scratch into a fresh model —
/// there is no incremental reparsing and no cross-document linking.
struct DocumentState {
    text: String,
    model: SemanticModel,
}

impl DocumentState {
    fn new(text: String) -> Self {
        let model = cms2_core::parse(&text);
        Self { text, model }
    }

    fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// Owns all per-URI document state. There are no locks: one message is
/// fully handled (read, dispatched, parsed if needed, responded to) before
/// the next is read off `Connection::receiver`.
pub struct LanguageServer {
    documents: AHashMap<Uri, DocumentState>,
}

impl Default for LanguageServer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageServer {
    pub fn new() -> Self {
        Self {
            documents: AHashMap::new(),
        }
    }

    fn on_request(
        &mut self,
        id: RequestId,
        method: &str,
        params: serde_json::Value,
    ) -> Option<Response> {
        match method {
            Completion::METHOD => {
                let params: CompletionParams = serde_json::from_value(params).ok()?;
                Some(Response::new_ok(id, self.completion(params)))
            }
            HoverRequest::METHOD => {
                let params: HoverParams = serde_json::from_value(params).ok()?;
                Some(Response::new_ok(id, self.hover(params)))
            }
            GotoDefinition::METHOD => {
                let params: GotoDefinitionParams = serde_json::from_value(params).ok()?;
                Some(Response::new_ok(id, self.definition(params)))
            }
            References::METHOD => {
                let params: ReferenceParams = serde_json::from_value(params).ok()?;
                Some(Response::new_ok(id, self.references(params)))
            }
            DocumentSymbolRequest::METHOD => {
                let params: DocumentSymbolParams = serde_json::from_value(params).ok()?;
                Some(Response::new_ok(id, self.document_symbols(params)))
            }
            other => {
                log::debug!("unhandled request method {other}, returning null result");
                Some(Response::new_ok(id, serde_json::Value::Null))
            }
        }
    }

    fn on_notification(&mut self, method: &str, params: serde_json::Value) {
        match method {
            DidOpenTextDocument::METHOD => {
                let Ok(params) = serde_json::from_value::<DidOpenTextDocumentParams>(params)
                else {
                    return;
                };
                let doc = params.text_document;
                self.documents.insert(doc.uri, DocumentState::new(doc.text));
            }
            DidChangeTextDocument::METHOD => {
                let Ok(mut params) = serde_json::from_value::<DidChangeTextDocumentParams>(params)
                else {
                    return;
                };
                // Full sync only: the last content change carries the whole
                // new document text.
                let Some(change) = params.content_changes.pop() else {
                    return;
                };
                self.documents
                    .insert(params.text_document.uri, DocumentState::new(change.text));
            }
            DidCloseTextDocument::METHOD => {
                let Ok(params) = serde_json::from_value::<DidCloseTextDocumentParams>(params)
                else {
                    return;
                };
                self.documents.remove(&params.text_document.uri);
            }
            other => {
                log::trace!("ignoring notification {other}");
            }
        }
    }

    fn completion(&self, params: CompletionParams) -> CompletionResponse {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let mut items = Vec::new();

        if let Some(doc) = self.documents.get(&uri) {
            let lines = doc.lines();
            if let Some(line) = lines.get(position.line as usize) {
                let prefix = query::completion_prefix(line, position.character as usize);
                for item in query::completions(&doc.model, &prefix) {
                    items.push(CompletionItem {
                        label: item.label,
                        kind: Some(completion_item_kind(item.kind)),
                        detail: Some(item.detail),
                        documentation: Some(Documentation::String(item.documentation)),
                        ..Default::default()
                    });
                }
            }
        }

        CompletionResponse::Array(items)
    }

    fn hover(&self, params: HoverParams) -> Option<Hover> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let doc = self.documents.get(&uri)?;
        let lines = doc.lines();
        let line = lines.get(position.line as usize)?;
        let word = query::word_at_position(line, position.character as usize)?;
        let info = query::hover_info(&doc.model, &word)?;
        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: markdown::render(&info),
            }),
            range: None,
        })
    }

    fn definition(&self, params: GotoDefinitionParams) -> Option<GotoDefinitionResponse> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let doc = self.documents.get(&uri)?;
        let lines = doc.lines();
        let line = lines.get(position.line as usize)?;
        let word = query::word_at_position(line, position.character as usize)?;
        let def_line = query::find_definition(&doc.model, &word)?;
        let point = Position::new(def_line as u32, 0);
        Some(GotoDefinitionResponse::Scalar(Location::new(
            uri,
            Range::new(point, point),
        )))
    }

    fn references(&self, params: ReferenceParams) -> Vec<Location> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(doc) = self.documents.get(&uri) else {
            return Vec::new();
        };
        let lines = doc.lines();
        let Some(line) = lines.get(position.line as usize) else {
            return Vec::new();
        };
        let Some(word) = query::word_at_position(line, position.character as usize) else {
            return Vec::new();
        };

        query::find_references(&lines, &word)
            .into_iter()
            .map(|occ| {
                let start = Position::new(occ.line as u32, occ.start as u32);
                let end = Position::new(occ.line as u32, occ.end as u32);
                Location::new(uri.clone(), Range::new(start, end))
            })
            .collect()
    }

    fn document_symbols(&self, params: DocumentSymbolParams) -> Option<DocumentSymbolResponse> {
        let doc = self.documents.get(&params.text_document.uri)?;
        let model = &doc.model;
        let mut symbols = Vec::new();

        for (name, block) in &model.sys_data_blocks {
            symbols.push(symbol(
                name,
                SymbolKind::MODULE,
                "SYS-DD",
                block.line_start,
                block.line_end,
            ));
        }
        for (name, block) in &model.sys_proc_blocks {
            let detail = if block.is_reentrant {
                "SYS-PROC-REN"
            } else {
                "SYS-PROC"
            };
            symbols.push(symbol(
                name,
                SymbolKind::MODULE,
                detail,
                block.line_start,
                block.line_end,
            ));
        }

        // Bare (non-scope-qualified) variable names only, deduplicated —
        // matches `get_all_symbols`'s outline-dedup contract.
        let mut seen = AHashSet::default();
        for (name, var) in &model.variables {
            if name.contains('.') || !seen.insert(name.as_str()) {
                continue;
            }
            symbols.push(symbol(
                name,
                SymbolKind::VARIABLE,
                &query::format_type(var),
                var.line_number,
                None,
            ));
        }

        for (name, table) in &model.tables {
            symbols.push(symbol(
                name,
                SymbolKind::STRUCT,
                &format!("TABLE {}", table.table_type.as_str()),
                table.line_start,
                table.line_end,
            ));
        }
        for (name, proc) in &model.procedures {
            let detail = if proc.is_exec { "EXEC-PROC" } else { "PROCEDURE" };
            symbols.push(symbol(
                name,
                SymbolKind::METHOD,
                detail,
                proc.line_start,
                proc.line_end,
            ));
        }
        for (name, func) in &model.functions {
            let detail = format!("FUNCTION -> {}", func.return_type.as_deref().unwrap_or("void"));
            symbols.push(symbol(
                name,
                SymbolKind::FUNCTION,
                &detail,
                func.line_start,
                func.line_end,
            ));
        }
        for (name, typedef) in &model.types {
            symbols.push(symbol(
                name,
                SymbolKind::TYPE_PARAMETER,
                "TYPE",
                typedef.line_start,
                typedef.line_end,
            ));
        }

        Some(DocumentSymbolResponse::Nested(symbols))
    }
}

/// Map the query layer's numeric completion-kind codes onto `lsp-types`'
/// `CompletionItemKind`. The codes in `cms2_core::query::completion_kind`
/// are the same numbers the LSP spec assigns these kinds, so this is a
/// direct lookup, not a reinterpretation.
fn completion_item_kind(kind: i32) -> CompletionItemKind {
    use query::completion_kind::{FUNCTION, KEYWORD, METHOD, STRUCT, TYPE_PARAMETER, VARIABLE};
    match kind {
        KEYWORD => CompletionItemKind::KEYWORD,
        FUNCTION => CompletionItemKind::FUNCTION,
        VARIABLE => CompletionItemKind::VARIABLE,
        STRUCT => CompletionItemKind::STRUCT,
        METHOD => CompletionItemKind::METHOD,
        TYPE_PARAMETER => CompletionItemKind::TYPE_PARAMETER,
        _ => CompletionItemKind::TEXT,
    }
}

#[allow(deprecated)] // `DocumentSymbol::deprecated` has no replacement field yet.
fn symbol(
    name: &str,
    kind: SymbolKind,
    detail: &str,
    line_start: usize,
    line_end: Option<usize>,
) -> DocumentSymbol {
    let end_line = line_end.unwrap_or(line_start) as u32;
    let range = Range::new(
        Position::new(line_start as u32, 0),
        Position::new(end_line, 0),
    );
    let selection_range = Range::new(
        Position::new(line_start as u32, 0),
        Position::new(line_start as u32, name.chars().count() as u32),
    );
    DocumentSymbol {
        name: name.to_string(),
        detail: Some(detail.to_string()),
        kind,
        tags: None,
        deprecated: None,
        range,
        selection_range,
        children: None,
    }
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
            open_close: Some(true),
            change: Some(TextDocumentSyncKind::FULL),
            will_save: None,
            will_save_wait_until: None,
            save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                include_text: Some(true),
            })),
        })),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(false),
            trigger_characters: Some(vec![".".into(), "(".into(), " ".into()]),
            ..Default::default()
        }),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        definition_provider: Some(OneOf::Left(true)),
        references_provider: Some(OneOf::Left(true)),
        document_symbol_provider: Some(OneOf::Left(true)),
        ..Default::default()
    }
}

fn server_initialize_result() -> InitializeResult {
    InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(ServerInfo {
            name: "CMS-2 Language Server".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    }
}

/// Entry point used by the binary: perform the `initialize` handshake over
/// stdio, then run the single-threaded main loop until `exit`.
pub fn run() {
    let (connection, io_threads) = Connection::stdio();

    let (id, params) = match connection.initialize_start() {
        Ok(v) => v,
        Err(err) => {
            log::error!("initialize handshake failed: {err}");
            return;
        }
    };
    if let Err(err) = serde_json::from_value::<InitializeParams>(params) {
        log::error!("malformed initialize params: {err}");
        return;
    }
    let result = match serde_json::to_value(server_initialize_result()) {
        Ok(v) => v,
        Err(err) => {
            log::error!("failed to encode initialize result: {err}");
            return;
        }
    };
    if let Err(err) = connection.initialize_finish(id, result) {
        log::error!("failed to finish initialize handshake: {err}");
        return;
    }

    main_loop(&connection);

    if let Err(err) = io_threads.join() {
        log::error!("io threads did not shut down cleanly: {err}");
    }
}

/// One message fully processed before the next is read — no internal
/// parallelism, no background reparse, no cancellation.
fn main_loop(connection: &Connection) {
    let mut server = LanguageServer::new();

    for message in &connection.receiver {
        match message {
            Message::Request(request) => match connection.handle_shutdown(&request) {
                Ok(true) => return,
                Ok(false) => {
                    if let Some(response) =
                        server.on_request(request.id, &request.method, request.params)
                    {
                        if let Err(err) = connection.sender.send(Message::Response(response)) {
                            log::error!("failed to send response: {err}");
                        }
                    }
                }
                Err(err) => {
                    log::error!("shutdown handshake error: {err}");
                    return;
                }
            },
            Message::Response(_) => {}
            Message::Notification(notification) => {
                if notification.method == "exit" {
                    return;
                }
                server.on_notification(&notification.method, notification.params);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::{ReferenceContext, TextDocumentIdentifier, TextDocumentPositionParams};

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    fn server_with_doc(text: &str) -> (LanguageServer, Uri) {
        let mut server = LanguageServer::new();
        let u = uri("file:///test.cms2");
        server.documents.insert(u.clone(), DocumentState::new(text.to_string()));
        (server, u)
    }

    #[test]
    fn completion_filters_by_prefix_and_maps_kinds() {
        let (server, u) = server_with_doc("VRBL ALTITUDE I 16 S $\n");
        let params = CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: u },
                position: Position::new(1, 0),
            },
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
            context: None,
        };
        let CompletionResponse::Array(items) = server.completion(params) else {
            panic!("expected array response");
        };
        assert!(
            items
                .iter()
                .any(|i| i.label == "ALTITUDE" && i.kind == Some(CompletionItemKind::VARIABLE))
        );
    }

    #[test]
    fn hover_resolves_variable_markdown() {
        let (server, u) = server_with_doc("VRBL ALTITUDE I 16 S $\n");
        let params = HoverParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: u },
                position: Position::new(0, 6),
            },
            work_done_progress_params: Default::default(),
        };
        let hover = server.hover(params).expect("hover result");
        let HoverContents::Markup(markup) = hover.contents else {
            panic!("expected markup contents");
        };
        assert!(markup.value.contains("VRBL ALTITUDE I 16 S"));
    }

    #[test]
    fn definition_resolves_declaration_line() {
        let (server, u) = server_with_doc("VRBL ALTITUDE I 16 S $\n");
        let params = GotoDefinitionParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: u },
                position: Position::new(0, 6),
            },
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
        };
        let Some(GotoDefinitionResponse::Scalar(loc)) = server.definition(params) else {
            panic!("expected scalar location");
        };
        assert_eq!(loc.range.start.line, 0);
    }

    #[test]
    fn references_finds_all_whole_word_occurrences() {
        let (server, u) = server_with_doc("VRBL ALT I 16 S $\nSET ALT TO ALT + 1 $\n");
        let params = ReferenceParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: u },
                position: Position::new(0, 6),
            },
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
            context: ReferenceContext { include_declaration: true },
        };
        let refs = server.references(params);
        assert_eq!(refs.len(), 3);
    }

    #[test]
    fn document_symbols_include_table_and_dedup_variables() {
        let (server, u) =
            server_with_doc("TABLE WP V MEDIUM 100 $\nFIELD X I 16 S $\nEND-TABLE WP $\n");
        let params = DocumentSymbolParams {
            text_document: TextDocumentIdentifier { uri: u },
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
        };
        let Some(DocumentSymbolResponse::Nested(symbols)) = server.document_symbols(params) else {
            panic!("expected nested symbols");
        };
        assert!(symbols.iter().any(|s| s.name == "WP" && s.kind == SymbolKind::STRUCT));
    }

    #[test]
    fn completion_item_kind_maps_known_codes() {
        assert_eq!(
            completion_item_kind(query::completion_kind::VARIABLE),
            CompletionItemKind::VARIABLE
        );
        assert_eq!(completion_item_kind(999), CompletionItemKind::TEXT);
    }

    #[test]
    fn unknown_request_method_returns_null_result() {
        let mut server = LanguageServer::new();
        let response = server.on_request(
            RequestId::from(1),
            "textDocument/foldingRange",
            serde_json::Value::Null,
        );
        assert_eq!(response.unwrap().result, Some(serde_json::Value::Null));
    }

    #[test]
    fn did_close_drops_document_state() {
        let (mut server, u) = server_with_doc("VRBL X I 16 S $\n");
        let params = DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: u.clone() },
        };
        server.on_notification(
            DidCloseTextDocument::METHOD,
            serde_json::to_value(params).unwrap(),
        );
        assert!(!server.documents.contains_key(&u));
    }
}
