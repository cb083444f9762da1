use crate::error::{Result, SearchError};
use crate::render::protocol::{RequestId, SearchCommand, SearchResponse};
use crate::search::{
    ContentMatcher, FolderWalker, HighlightedContent, MatchMode, MatchResult, SearchConfig,
};
use log::debug;
use std::path::PathBuf;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the search worker processing commands from the application loop.
///
/// Commands are handled one at a time, so at most one search is in flight.
pub async fn search_worker_loop(
    mut rx: Receiver<SearchCommand>,
    tx: Sender<SearchResponse>,
    walker: FolderWalker,
) {
    let mut state = WorkerState::new(walker);

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct WorkerState {
    walker: FolderWalker,
    /// Matcher of the most recent search, reused for previews of its results
    last_matcher: Option<ContentMatcher>,
}

impl WorkerState {
    fn new(walker: FolderWalker) -> Self {
        Self {
            walker,
            last_matcher: None,
        }
    }

    async fn handle_command(&mut self, cmd: SearchCommand) -> HandlerOutcome {
        match cmd {
            SearchCommand::RunSearch { request_id, config } => {
                match self.run_search(request_id, config).await {
                    Ok(result) => HandlerOutcome::respond(SearchResponse::SearchCompleted {
                        request_id,
                        result,
                    }),
                    Err(error) => {
                        HandlerOutcome::respond(SearchResponse::Error { request_id, error })
                    }
                }
            }
            SearchCommand::LoadPreview {
                request_id,
                path,
                keyword,
                mode,
            } => match self.load_preview(path.clone(), &keyword, mode).await {
                Ok(content) => HandlerOutcome::respond(SearchResponse::PreviewLoaded {
                    request_id,
                    path,
                    content,
                }),
                Err(error) => HandlerOutcome::respond(SearchResponse::Error { request_id, error }),
            },
            SearchCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    async fn run_search(
        &mut self,
        request_id: RequestId,
        config: SearchConfig,
    ) -> Result<MatchResult> {
        debug!("request {}: searching {}", request_id, config.root.display());

        // Compile up front so a bad pattern never reaches the blocking pool
        let matcher = ContentMatcher::new(&config.keyword, config.mode)?;
        self.last_matcher = Some(matcher.clone());

        let walker = self.walker.clone();
        tokio::task::spawn_blocking(move || {
            walker.search_with(&config.root, &matcher, &config.extensions)
        })
        .await
        .map_err(|e| SearchError::other(format!("search task failed: {e}")))?
    }

    async fn load_preview(
        &mut self,
        path: PathBuf,
        keyword: &str,
        mode: MatchMode,
    ) -> Result<HighlightedContent> {
        let matcher = if keyword.is_empty() {
            None
        } else {
            Some(self.matcher_for(keyword, mode)?)
        };

        let loader = self.walker.loader().clone();
        let content = tokio::task::spawn_blocking(move || loader.load(&path))
            .await
            .map_err(|e| SearchError::other(format!("preview task failed: {e}")))??;

        Ok(match matcher {
            Some(matcher) => HighlightedContent::new(content, &matcher),
            None => HighlightedContent::plain(content),
        })
    }

    fn matcher_for(&mut self, keyword: &str, mode: MatchMode) -> Result<ContentMatcher> {
        if let Some(matcher) = &self.last_matcher {
            if matcher.keyword() == keyword && matcher.mode() == mode {
                return Ok(matcher.clone());
            }
        }
        let matcher = ContentMatcher::new(keyword, mode)?;
        self.last_matcher = Some(matcher.clone());
        Ok(matcher)
    }
}

struct HandlerOutcome {
    response: Option<SearchResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: SearchResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
