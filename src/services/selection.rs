// src/services/selection.rs

//! Selection controller.
//!
//! Turns a record selection into fetch + render, keeping the view intact on
//! failure and ignoring responses that a newer selection has superseded.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{DisplayedDocument, Record};
use crate::services::annotate::{AnnotationRenderer, RenderReport};
use crate::services::fetcher::ArtifactFetcher;
use crate::services::surface::CodeSurface;

/// How one selection ended.
#[derive(Debug)]
pub enum SelectionOutcome {
    /// Content was fetched and rendered
    Rendered(RenderReport),
    /// A newer selection superseded this one before its fetch resolved
    Stale { id: u64 },
    /// The fetch failed; the view was left as it was
    Failed(AppError),
}

/// Counters over all selections of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionStats {
    pub rendered: usize,
    pub stale: usize,
    pub failed: usize,
}

struct ViewState<S: CodeSurface> {
    renderer: AnnotationRenderer<S>,
    displayed: Option<DisplayedDocument>,
    stats: SelectionStats,
}

/// Drives fetch and render for user selections.
pub struct SelectionController<S: CodeSurface> {
    fetcher: Arc<dyn ArtifactFetcher>,
    view: Mutex<ViewState<S>>,
    generation: AtomicU64,
}

impl<S: CodeSurface> SelectionController<S> {
    pub fn new(fetcher: Arc<dyn ArtifactFetcher>, renderer: AnnotationRenderer<S>) -> Self {
        Self {
            fetcher,
            view: Mutex::new(ViewState {
                renderer,
                displayed: None,
                stats: SelectionStats::default(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Handle a selection of `record`.
    ///
    /// The selection is ordered at call time, before the returned future is
    /// first polled: of several outstanding selections only the most recently
    /// made one may update the view.
    pub fn on_record_selected<'a>(
        &'a self,
        record: &'a Record,
    ) -> impl Future<Output = SelectionOutcome> + 'a {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Selection #{} -> record {}", ticket, record.id);

        async move {
            let result = self.fetcher.fetch(record).await;

            // Check and render under the same lock so no newer selection can
            // slip in between.
            let mut view = self.view.lock().await;
            if self.generation.load(Ordering::SeqCst) != ticket {
                view.stats.stale += 1;
                log::debug!(
                    "Dropping response for record {} (selection #{} superseded)",
                    record.id,
                    ticket
                );
                return SelectionOutcome::Stale { id: record.id };
            }

            match result {
                Ok(content) => {
                    let report =
                        view.renderer
                            .render(&content, record.start_line, record.end_line);
                    if let Some(err) = report.inconsistency(record.id) {
                        log::warn!("{}; showing content with partial or no highlight", err);
                    }
                    view.displayed = Some(DisplayedDocument {
                        record_id: record.id,
                        content,
                        decoration: report.decoration,
                        fetched_at: Utc::now(),
                    });
                    view.stats.rendered += 1;
                    SelectionOutcome::Rendered(report)
                }
                Err(err) => {
                    view.stats.failed += 1;
                    log::error!("{}", err);
                    SelectionOutcome::Failed(err)
                }
            }
        }
    }

    /// The document currently on screen, if any.
    pub async fn displayed(&self) -> Option<DisplayedDocument> {
        self.view.lock().await.displayed.clone()
    }

    pub async fn stats(&self) -> SelectionStats {
        self.view.lock().await.stats
    }

    /// Run `f` against the code surface.
    pub async fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let view = self.view.lock().await;
        f(view.renderer.surface())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::error::Result;
    use crate::models::LineRange;
    use crate::services::surface::TextSurface;

    fn record(id: u64, hash: &str, start: usize, end: usize) -> Record {
        Record {
            id,
            project_name: "demo".to_string(),
            start_line: start,
            end_line: end,
            defect_file_hash: hash.to_string(),
            extra: BTreeMap::new(),
        }
    }

    fn numbered(prefix: &str, count: usize) -> String {
        (1..=count)
            .map(|i| format!("{prefix} {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Answers immediately with a fixed body per record id.
    struct StaticFetcher {
        bodies: HashMap<u64, String>,
    }

    #[async_trait]
    impl ArtifactFetcher for StaticFetcher {
        async fn fetch(&self, record: &Record) -> Result<String> {
            self.bodies
                .get(&record.id)
                .cloned()
                .ok_or_else(|| AppError::fetch(record.id, "HTTP status 404 Not Found"))
        }
    }

    /// Answers when the test sends the body through a channel.
    struct GatedFetcher {
        gates: StdMutex<HashMap<u64, oneshot::Receiver<String>>>,
    }

    #[async_trait]
    impl ArtifactFetcher for GatedFetcher {
        async fn fetch(&self, record: &Record) -> Result<String> {
            let gate = self.gates.lock().unwrap().remove(&record.id);
            match gate {
                Some(rx) => rx.await.map_err(|e| AppError::fetch(record.id, e)),
                None => Err(AppError::fetch(record.id, "no gate")),
            }
        }
    }

    /// Records every call made to it.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
        lines: usize,
    }

    impl CodeSurface for RecordingSurface {
        fn set_text(&mut self, text: &str) {
            self.lines = text.lines().count();
            self.calls.push(format!("set_text({})", self.lines));
        }

        fn line_count(&self) -> usize {
            self.lines
        }

        fn add_line_decoration(&mut self, range: LineRange) {
            self.calls
                .push(format!("decorate({}..={})", range.start, range.end));
        }

        fn reveal_line(&mut self, line: usize) {
            self.calls.push(format!("reveal({line})"));
        }
    }

    fn controller_with(
        fetcher: impl ArtifactFetcher + 'static,
        height: usize,
    ) -> SelectionController<TextSurface> {
        SelectionController::new(
            Arc::new(fetcher),
            AnnotationRenderer::new(TextSurface::new(height)),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_selection() {
        let fetcher = StaticFetcher {
            bodies: HashMap::from([(42, numbered("line", 20))]),
        };
        let controller = controller_with(fetcher, 24);
        let selected = record(42, "abc123", 10, 15);

        let outcome = controller.on_record_selected(&selected).await;
        assert!(matches!(outcome, SelectionOutcome::Rendered(r) if r.is_consistent()));

        let shown = controller.displayed().await.unwrap();
        assert_eq!(shown.record_id, 42);
        assert_eq!(shown.line_count(), 20);
        assert_eq!(shown.decoration, Some(LineRange::new(10, 15)));

        controller
            .with_surface(|surface| {
                assert_eq!(surface.line_count(), 20);
                assert_eq!(surface.decorations(), &[LineRange::new(10, 15)]);
                assert!(surface.is_line_visible(10));
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_view_untouched() {
        let fetcher = StaticFetcher {
            bodies: HashMap::new(),
        };
        let controller = controller_with(fetcher, 24);
        let selected = record(42, "abc123", 10, 15);

        let outcome = controller.on_record_selected(&selected).await;
        assert!(matches!(
            outcome,
            SelectionOutcome::Failed(AppError::Fetch { id: 42, .. })
        ));
        assert!(controller.displayed().await.is_none());
        assert!(controller.with_surface(|s| s.is_empty()).await);
        assert_eq!(
            controller.stats().await,
            SelectionStats {
                rendered: 0,
                stale: 0,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_document() {
        let fetcher = StaticFetcher {
            bodies: HashMap::from([(1, numbered("one", 5))]),
        };
        let controller = controller_with(fetcher, 24);

        controller.on_record_selected(&record(1, "a", 2, 3)).await;
        let outcome = controller.on_record_selected(&record(2, "b", 1, 1)).await;

        assert!(matches!(outcome, SelectionOutcome::Failed(_)));
        let shown = controller.displayed().await.unwrap();
        assert_eq!(shown.record_id, 1);
        controller
            .with_surface(|s| {
                assert_eq!(s.lines()[0], "one 1");
                assert_eq!(s.decorations(), &[LineRange::new(2, 3)]);
            })
            .await;
    }

    #[tokio::test]
    async fn test_render_called_once_with_exact_bounds() {
        let fetcher = StaticFetcher {
            bodies: HashMap::from([(8, numbered("x", 30))]),
        };
        let controller = SelectionController::new(
            Arc::new(fetcher),
            AnnotationRenderer::new(RecordingSurface::default()),
        );

        controller.on_record_selected(&record(8, "h", 12, 17)).await;

        let calls = controller.with_surface(|s| s.calls.clone()).await;
        assert_eq!(calls, vec!["set_text(30)", "decorate(12..=17)", "reveal(12)"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_ignored() {
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_b, rx_b) = oneshot::channel();
        let fetcher = GatedFetcher {
            gates: StdMutex::new(HashMap::from([(1, rx_a), (2, rx_b)])),
        };
        let controller = controller_with(fetcher, 24);
        let record_a = record(1, "a", 1, 2);
        let record_b = record(2, "b", 3, 4);

        let select_a = controller.on_record_selected(&record_a);
        let select_b = controller.on_record_selected(&record_b);
        let respond = async {
            tx_b.send(numbered("B", 6)).unwrap();
            // Let B's response land before A's.
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            tx_a.send(numbered("A", 6)).unwrap();
        };

        let (outcome_a, outcome_b, ()) = tokio::join!(select_a, select_b, respond);

        assert!(matches!(outcome_a, SelectionOutcome::Stale { id: 1 }));
        assert!(matches!(outcome_b, SelectionOutcome::Rendered(_)));

        let shown = controller.displayed().await.unwrap();
        assert_eq!(shown.record_id, 2);
        controller
            .with_surface(|s| {
                assert_eq!(s.lines()[0], "B 1");
                assert_eq!(s.decorations(), &[LineRange::new(3, 4)]);
            })
            .await;
        assert_eq!(controller.stats().await.stale, 1);
    }

    #[tokio::test]
    async fn test_stale_response_ignored_when_it_arrives_first() {
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_b, rx_b) = oneshot::channel();
        let fetcher = GatedFetcher {
            gates: StdMutex::new(HashMap::from([(1, rx_a), (2, rx_b)])),
        };
        let controller = controller_with(fetcher, 24);
        let record_a = record(1, "a", 1, 2);
        let record_b = record(2, "b", 3, 4);

        let select_a = controller.on_record_selected(&record_a);
        let select_b = controller.on_record_selected(&record_b);
        tx_a.send(numbered("A", 6)).unwrap();
        tx_b.send(numbered("B", 6)).unwrap();

        let (outcome_a, outcome_b) = tokio::join!(select_a, select_b);

        assert!(matches!(outcome_a, SelectionOutcome::Stale { id: 1 }));
        assert!(matches!(outcome_b, SelectionOutcome::Rendered(_)));
        assert_eq!(controller.displayed().await.unwrap().record_id, 2);
    }

    #[tokio::test]
    async fn test_short_content_still_displayed() {
        let fetcher = StaticFetcher {
            bodies: HashMap::from([(5, numbered("line", 12))]),
        };
        let controller = controller_with(fetcher, 24);

        let outcome = controller.on_record_selected(&record(5, "h", 10, 15)).await;

        match outcome {
            SelectionOutcome::Rendered(report) => {
                assert_eq!(report.decoration, Some(LineRange::new(10, 12)));
                assert!(!report.is_consistent());
            }
            other => panic!("expected render, got {other:?}"),
        }
        assert_eq!(controller.with_surface(|s| s.line_count()).await, 12);
    }
}
