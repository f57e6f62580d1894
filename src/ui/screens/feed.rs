//! Infinite-scroll meme feed with per-meme comment threads.
//!
//! All network work runs on a background tokio runtime; tasks report back
//! over a channel and the UI drains it once per frame. Query results are
//! held in the cache layer state machines, so this screen only decides
//! WHEN to fetch and draws whatever the caches currently hold.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::Utc;
use eframe::egui;
use log::{debug, error, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::api::{self, MemeApi};
use crate::cache::{with_retries, PaginatedQuery, UserCache};
use crate::error::ApiResult;
use crate::models::{Comment, Meme, Page, User};
use crate::session::Session;
use crate::ui::components::meme_card::{self, CommentThread, MemeAction};
use crate::ui::state::{handle_unauthorized, AppState, Screen};

/// Hovering the comments toggle pre-warms the thread; a thread fetched
/// less than this long ago is not refetched by the hover.
const HOVER_PREFETCH_FRESHNESS: Duration = Duration::from_secs(60);

/// Message sent from background fetch tasks.
pub enum FeedEvent {
    MemesPage {
        page_number: u32,
        result: ApiResult<Page<Meme>>,
    },
    CommentsPage {
        meme_id: String,
        page_number: u32,
        result: ApiResult<Page<Comment>>,
    },
    UserLoaded {
        user_id: String,
        result: ApiResult<User>,
    },
    CommentPosted {
        meme_id: String,
        result: ApiResult<()>,
    },
    PictureLoaded {
        url: String,
        result: ApiResult<Vec<u8>>,
    },
}

/// What applying an event asks the frame loop to do next.
#[derive(Default)]
struct EventOutcome {
    /// The server rejected the session; run the global logout path.
    unauthorized: bool,
    /// Freshly downloaded picture bytes to decode into a texture.
    picture_bytes: Option<(String, Vec<u8>)>,
}

pub struct FeedState {
    pub memes: PaginatedQuery<Meme>,
    /// Comment thread state per meme id.
    pub threads: HashMap<String, CommentThread>,
    pub users: UserCache,
    /// Decoded picture textures keyed by URL.
    pub pictures: HashMap<String, egui::TextureHandle>,
    pub loading_pictures: HashSet<String>,
    /// URLs whose download or decode failed; they keep their placeholder
    /// instead of being requested again every frame.
    pub failed_pictures: HashSet<String>,
    pub error: Option<String>,
    runtime: Runtime,
    tx: UnboundedSender<FeedEvent>,
    rx: UnboundedReceiver<FeedEvent>,
}

impl Default for FeedState {
    fn default() -> Self {
        let (tx, rx) = unbounded_channel();
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self {
            memes: PaginatedQuery::default(),
            threads: HashMap::new(),
            users: UserCache::default(),
            pictures: HashMap::new(),
            loading_pictures: HashSet::new(),
            failed_pictures: HashSet::new(),
            error: None,
            runtime,
            tx,
            rx,
        }
    }
}

impl FeedState {
    /// Whether a download should start for `url`, marking it in flight
    /// if so. Loaded, in-flight and known-bad URLs are all skipped.
    fn begin_picture_fetch(&mut self, url: &str) -> bool {
        if self.pictures.contains_key(url) || self.failed_pictures.contains(url) {
            return false;
        }
        self.loading_pictures.insert(url.to_string())
    }
}

pub struct FeedScreen;

impl FeedScreen {
    pub fn show(
        ctx: &egui::Context,
        app_state: &mut AppState,
        session: &mut Session,
        api: &MemeApi,
        state: &mut FeedState,
    ) {
        Self::poll_events(ctx, app_state, session, state);

        // Initial load. After an error the user retries explicitly.
        if state.memes.is_empty() && !state.memes.is_fetching() && state.error.is_none() {
            if let Some(page) = state.memes.begin_fetch() {
                Self::fetch_memes_page(ctx, state, api, page);
            }
        }

        let own_id = session.user_id();
        if let Some(id) = &own_id {
            Self::ensure_user(ctx, state, api, id);
        }
        let current_user = own_id.and_then(|id| state.users.get(&id).cloned());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Meme Feed");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        session.clear_token();
                        app_state.login_redirect = Screen::Feed;
                        app_state.current_screen = Screen::Login;
                    }
                    if ui.button("Create a meme").clicked() {
                        app_state.current_screen = Screen::Create;
                    }
                });
            });
            ui.separator();

            if let Some(message) = state.error.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::LIGHT_RED, &message);
                    if ui.button("Retry").clicked() {
                        state.error = None;
                    }
                });
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    Self::show_feed(ctx, ui, state, api, current_user.as_ref());
                });
        });
    }

    fn show_feed(
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        state: &mut FeedState,
        api: &MemeApi,
        current_user: Option<&User>,
    ) {
        let now = Utc::now();
        let memes: Vec<Meme> = state.memes.items().cloned().collect();

        if memes.is_empty() && !state.memes.is_fetching() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| ui.weak("No memes yet. Be the first to post one!"));
            return;
        }

        for meme in &memes {
            Self::ensure_user(ctx, state, api, &meme.author_id);
            Self::ensure_picture(ctx, state, api, &meme.picture_url);

            // Author lookups for comments already on screen.
            let comment_authors: Vec<String> = state
                .threads
                .get(&meme.id)
                .map(|t| t.comments.items().map(|c| c.author_id.clone()).collect())
                .unwrap_or_default();
            for author_id in &comment_authors {
                Self::ensure_user(ctx, state, api, author_id);
            }

            // An expanded thread with no data loads its first page. This
            // also refetches after posting a comment invalidated it.
            let refetch = {
                let thread = state.threads.entry(meme.id.clone()).or_default();
                if thread.expanded && thread.comments.is_empty() {
                    thread.comments.begin_fetch()
                } else {
                    None
                }
            };
            if let Some(page) = refetch {
                Self::fetch_comments_page(ctx, state, api, meme.id.clone(), page);
            }

            let author = state.users.get(&meme.author_id).cloned();
            let texture = state.pictures.get(&meme.picture_url).cloned();

            let actions = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let thread = state.threads.entry(meme.id.clone()).or_default();
                    meme_card::show(
                        ui,
                        meme,
                        author.as_ref(),
                        current_user,
                        texture.as_ref(),
                        thread,
                        &state.users,
                        now,
                    )
                })
                .inner;

            for action in actions {
                Self::apply_action(ctx, state, api, &meme.id, action);
            }
            ui.add_space(8.0);
        }

        if state.memes.is_fetching() {
            ui.vertical_centered(|ui| ui.spinner());
        } else if state.memes.has_next() {
            // Sentinel row at the bottom; scrolling it into view pulls
            // the next page.
            let sentinel = ui.allocate_response(
                egui::vec2(ui.available_width(), 1.0),
                egui::Sense::hover(),
            );
            if ui.is_rect_visible(sentinel.rect) {
                if let Some(page) = state.memes.begin_fetch() {
                    Self::fetch_memes_page(ctx, state, api, page);
                }
            }
        }
    }

    fn apply_action(
        ctx: &egui::Context,
        state: &mut FeedState,
        api: &MemeApi,
        meme_id: &str,
        action: MemeAction,
    ) {
        match action {
            MemeAction::ToggleComments => {
                let thread = state.threads.entry(meme_id.to_string()).or_default();
                thread.expanded = !thread.expanded;
            }
            MemeAction::HoverComments => {
                let page = state
                    .threads
                    .entry(meme_id.to_string())
                    .or_default()
                    .comments
                    .prefetch(HOVER_PREFETCH_FRESHNESS);
                if let Some(page) = page {
                    debug!("Pre-warming comments for meme {meme_id}");
                    Self::fetch_comments_page(ctx, state, api, meme_id.to_string(), page);
                }
            }
            MemeAction::LoadMoreComments => {
                let page = state
                    .threads
                    .entry(meme_id.to_string())
                    .or_default()
                    .comments
                    .begin_fetch();
                if let Some(page) = page {
                    Self::fetch_comments_page(ctx, state, api, meme_id.to_string(), page);
                }
            }
            MemeAction::SubmitComment(content) => {
                let content = content.trim().to_string();
                if content.is_empty() {
                    return;
                }
                state
                    .threads
                    .entry(meme_id.to_string())
                    .or_default()
                    .posting = true;
                Self::post_comment(ctx, state, api, meme_id.to_string(), content);
            }
        }
    }

    /// Drains the event channel and applies each result (non-blocking).
    fn poll_events(
        ctx: &egui::Context,
        app_state: &mut AppState,
        session: &mut Session,
        state: &mut FeedState,
    ) {
        let mut unauthorized = false;
        while let Ok(event) = state.rx.try_recv() {
            let outcome = apply_event(state, event);
            unauthorized |= outcome.unauthorized;
            if let Some((url, bytes)) = outcome.picture_bytes {
                Self::install_picture(ctx, state, url, &bytes);
            }
        }
        if unauthorized {
            handle_unauthorized(app_state, session, Screen::Feed);
        }
    }

    fn install_picture(ctx: &egui::Context, state: &mut FeedState, url: String, bytes: &[u8]) {
        match image::load_from_memory(bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                let texture = ctx.load_texture(&url, color_image, egui::TextureOptions::LINEAR);
                state.pictures.insert(url, texture);
            }
            Err(e) => {
                error!("Failed to decode picture from {url}: {e}");
                state.failed_pictures.insert(url);
            }
        }
    }

    fn ensure_user(ctx: &egui::Context, state: &mut FeedState, api: &MemeApi, user_id: &str) {
        if !state.users.begin_fetch(user_id) {
            return;
        }
        let api = api.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        let user_id = user_id.to_string();
        state.runtime.spawn(async move {
            let result = with_retries(|| api.get_user_by_id(&user_id)).await;
            let _ = tx.send(FeedEvent::UserLoaded { user_id, result });
            ctx.request_repaint();
        });
    }

    fn ensure_picture(ctx: &egui::Context, state: &mut FeedState, api: &MemeApi, url: &str) {
        if !state.begin_picture_fetch(url) {
            return;
        }
        let client = api.client.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        let url = url.to_string();
        state.runtime.spawn(async move {
            let result = api::fetch_picture(&client, &url).await;
            let _ = tx.send(FeedEvent::PictureLoaded { url, result });
            ctx.request_repaint();
        });
    }

    fn fetch_memes_page(ctx: &egui::Context, state: &FeedState, api: &MemeApi, page_number: u32) {
        debug!("Fetching memes page {page_number}");
        let api = api.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        state.runtime.spawn(async move {
            let result = with_retries(|| api.get_memes(page_number)).await;
            let _ = tx.send(FeedEvent::MemesPage {
                page_number,
                result,
            });
            ctx.request_repaint();
        });
    }

    fn fetch_comments_page(
        ctx: &egui::Context,
        state: &FeedState,
        api: &MemeApi,
        meme_id: String,
        page_number: u32,
    ) {
        debug!("Fetching comments page {page_number} for meme {meme_id}");
        let api = api.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        state.runtime.spawn(async move {
            let result = with_retries(|| api.get_meme_comments(&meme_id, page_number)).await;
            let _ = tx.send(FeedEvent::CommentsPage {
                meme_id,
                page_number,
                result,
            });
            ctx.request_repaint();
        });
    }

    /// Mutations are sent once; a failure surfaces to the user instead
    /// of being retried behind their back.
    fn post_comment(
        ctx: &egui::Context,
        state: &FeedState,
        api: &MemeApi,
        meme_id: String,
        content: String,
    ) {
        let api = api.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        state.runtime.spawn(async move {
            let result = api.create_meme_comment(&meme_id, &content).await;
            let _ = tx.send(FeedEvent::CommentPosted { meme_id, result });
            ctx.request_repaint();
        });
    }
}

/// Applies one background-task result to the feed state. Kept free of
/// egui so it can be exercised directly in tests.
fn apply_event(state: &mut FeedState, event: FeedEvent) -> EventOutcome {
    let mut outcome = EventOutcome::default();
    match event {
        FeedEvent::MemesPage {
            page_number,
            result,
        } => match result {
            Ok(page) => {
                state.memes.complete(page_number, page);
            }
            Err(e) => {
                state.memes.fail(page_number);
                if e.is_unauthorized() {
                    outcome.unauthorized = true;
                } else {
                    warn!("Failed to load memes page {page_number}: {e}");
                    state.error = Some(format!("Could not load the feed: {e}"));
                }
            }
        },
        FeedEvent::CommentsPage {
            meme_id,
            page_number,
            result,
        } => {
            let thread = state.threads.entry(meme_id.clone()).or_default();
            match result {
                Ok(page) => {
                    thread.comments.complete(page_number, page);
                }
                Err(e) => {
                    thread.comments.fail(page_number);
                    if e.is_unauthorized() {
                        outcome.unauthorized = true;
                    } else {
                        warn!("Failed to load comments for meme {meme_id}: {e}");
                        state.error = Some(format!("Could not load comments: {e}"));
                    }
                }
            }
        }
        FeedEvent::UserLoaded { user_id, result } => match result {
            Ok(user) => state.users.complete(user),
            Err(e) => {
                state.users.fail(&user_id);
                if e.is_unauthorized() {
                    outcome.unauthorized = true;
                } else {
                    // Cards render a placeholder author; no banner for this.
                    warn!("Failed to load user {user_id}: {e}");
                }
            }
        },
        FeedEvent::CommentPosted { meme_id, result } => {
            let thread = state.threads.entry(meme_id.clone()).or_default();
            thread.posting = false;
            match result {
                Ok(()) => {
                    thread.composer.clear();
                    // The thread refetches from page 1 so the new comment
                    // shows up where the server sorted it.
                    thread.comments.invalidate();
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        outcome.unauthorized = true;
                    } else {
                        warn!("Failed to post comment on meme {meme_id}: {e}");
                        state.error = Some(format!("Could not post your comment: {e}"));
                    }
                }
            }
        }
        FeedEvent::PictureLoaded { url, result } => {
            state.loading_pictures.remove(&url);
            match result {
                Ok(bytes) => outcome.picture_bytes = Some((url, bytes)),
                Err(e) => {
                    warn!("Failed to download picture {url}: {e}");
                    // Remember the failure; retrying every frame would
                    // hammer the server at round-trip speed.
                    state.failed_pictures.insert(url);
                }
            }
        }
    }
    outcome
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
