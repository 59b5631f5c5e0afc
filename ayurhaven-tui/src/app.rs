use ayurhaven::session::{ChatSession, INPUT_PLACEHOLDER, SAMPLE_QUESTIONS};
use ayurhaven::{AppContext, Message, StorageError, ThreadId};
use ratatui::widgets::{Block, Borders};
use tokio::sync::mpsc;
use tui_textarea::TextArea;

/// A reply coming back from a spawned completion task.
#[derive(Debug, Clone)]
pub struct CompletionEvent {
    pub thread_id: ThreadId,
    pub reply: String,
}

pub struct App {
    pub ctx: AppContext,
    pub session: ChatSession,
    pub textarea: TextArea<'static>,
    pub sidebar_open: bool,
    pub sidebar_selected: usize,
    /// Lines scrolled back from the bottom of the conversation.
    pub scroll_back: u16,
    pub status: Option<String>,
    pub should_quit: bool,
    reply_tx: mpsc::Sender<CompletionEvent>,
    reply_rx: mpsc::Receiver<CompletionEvent>,
}

pub fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.set_block(Block::default().borders(Borders::ALL).title("Input"));
    textarea.set_max_histories(100);
    textarea
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel(16);
        Self {
            ctx,
            session: ChatSession::new(),
            textarea: new_textarea(),
            sidebar_open: false,
            sidebar_selected: 0,
            scroll_back: 0,
            status: None,
            should_quit: false,
            reply_tx,
            reply_rx,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn current_messages(&self) -> &[Message] {
        self.ctx.conversations.current_messages()
    }

    fn report(&mut self, e: StorageError) {
        tracing::error!("Storage error: {}", e);
        self.status = Some(format!("Could not save: {}", e));
    }

    pub fn new_chat(&mut self) {
        if let Err(e) = self.ctx.conversations.create_thread() {
            self.report(e);
        }
        self.sidebar_open = false;
        self.sidebar_selected = 0;
        self.scroll_back = 0;
    }

    pub fn clear_conversations(&mut self) {
        if let Err(e) = self.ctx.conversations.clear_all() {
            self.report(e);
        }
        self.sidebar_selected = 0;
        self.scroll_back = 0;
        self.status = Some("All conversations cleared".to_string());
    }

    pub fn toggle_theme(&mut self) {
        if let Err(e) = self.ctx.theme.toggle() {
            self.report(e);
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        if self.sidebar_open {
            self.sidebar_selected = self
                .ctx
                .conversations
                .active_id()
                .and_then(|id| {
                    self.ctx
                        .conversations
                        .threads()
                        .iter()
                        .position(|t| t.id == id)
                })
                .unwrap_or(0);
        }
    }

    pub fn sidebar_next(&mut self) {
        let len = self.ctx.conversations.len();
        if len > 0 {
            self.sidebar_selected = (self.sidebar_selected + 1) % len;
        }
    }

    pub fn sidebar_previous(&mut self) {
        let len = self.ctx.conversations.len();
        if len > 0 {
            self.sidebar_selected = if self.sidebar_selected == 0 {
                len - 1
            } else {
                self.sidebar_selected - 1
            };
        }
    }

    pub fn open_selected_thread(&mut self) {
        let Some(id) = self
            .ctx
            .conversations
            .threads()
            .get(self.sidebar_selected)
            .map(|t| t.id)
        else {
            return;
        };
        if let Err(e) = self.ctx.conversations.set_active(id) {
            self.report(e);
        }
        self.sidebar_open = false;
        self.scroll_back = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Sends whatever is in the input box. The box is only cleared when the
    /// message was actually sent.
    pub fn submit_input(&mut self) {
        let text = self.textarea.lines().join("\n");
        if self.send(&text) {
            self.textarea = new_textarea();
        }
    }

    /// Sends one of the empty-state sample questions (0-based).
    pub fn send_sample(&mut self, index: usize) -> bool {
        if !self.current_messages().is_empty() {
            return false;
        }
        match SAMPLE_QUESTIONS.get(index) {
            Some(sample) => self.send(sample.question),
            None => false,
        }
    }

    /// Starts a turn and spawns the completion request. Must run inside a
    /// tokio runtime. Returns false if the submission was ignored.
    pub fn send(&mut self, text: &str) -> bool {
        let Some(turn) = self.session.begin_turn(&mut self.ctx.conversations, text) else {
            return false;
        };
        self.scroll_back = 0;
        self.status = None;

        let client = self.ctx.client.clone();
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            tracing::debug!(thread_id = %turn.thread_id, "Spawning completion task");
            let reply = client.complete(&turn.history).await;
            if tx
                .send(CompletionEvent {
                    thread_id: turn.thread_id,
                    reply,
                })
                .await
                .is_err()
            {
                tracing::warn!("UI closed before the reply arrived");
            }
        });
        true
    }

    /// Applies any replies that have arrived since the last frame.
    pub fn process_completions(&mut self) {
        while let Ok(event) = self.reply_rx.try_recv() {
            self.apply_completion(event);
        }
    }

    /// Waits for the next reply and applies it.
    pub async fn wait_for_completion(&mut self) {
        if let Some(event) = self.reply_rx.recv().await {
            self.apply_completion(event);
        }
    }

    fn apply_completion(&mut self, event: CompletionEvent) {
        let expected = self.session.pending().map(|turn| turn.thread_id);
        if expected != Some(event.thread_id) {
            tracing::warn!(thread_id = %event.thread_id, "Reply does not match the pending turn; dropping it");
            return;
        }
        self.session
            .finish_turn(&mut self.ctx.conversations, event.reply);
        if self.ctx.conversations.active_id() == Some(event.thread_id) {
            self.scroll_back = 0;
        }
    }
}
